pub mod cards;
pub mod csv;
pub mod dataflow;
pub mod intro;
pub mod prelude;
pub mod sample;
pub mod state;
pub mod themes;
pub mod upload;
pub mod widgets;

use std::sync::Arc;

use dark_light::Mode;
use eframe::egui;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

pub use introbook_macros::notebook;

use crate::cards::{Card, CardContext};
use crate::state::{StateId, StateStore};

/// Maximum width of the card column, in points.
pub const CONTENT_WIDTH: f32 = 740.0;
const CARD_GAP: f32 = 8.0;
const DEFAULT_WINDOW_SIZE: [f32; 2] = [820.0, 900.0];

#[derive(Debug, Error, PartialEq)]
pub enum ArgError {
    #[error("{0} expects a value")]
    MissingValue(&'static str),
    #[error("--theme expects one of light, dark or system, got '{0}'")]
    InvalidTheme(String),
    #[error("--scale expects a positive number, got '{0}'")]
    InvalidScale(String),
    #[error("--size expects <width>x<height>, got '{0}'")]
    InvalidSize(String),
}

/// How a notebook window is opened.
#[derive(Clone, Debug)]
pub struct NotebookConfig {
    name: String,
    theme: Option<egui::ThemePreference>,
    pixels_per_point: Option<f32>,
    window_size: [f32; 2],
}

impl NotebookConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            theme: None,
            pixels_per_point: None,
            window_size: DEFAULT_WINDOW_SIZE,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Explicit theme. Without one the operating system preference is used.
    pub fn with_theme(mut self, theme: egui::ThemePreference) -> Self {
        self.theme = Some(theme);
        self
    }

    pub fn theme(&self) -> Option<egui::ThemePreference> {
        self.theme
    }

    pub fn with_pixels_per_point(mut self, pixels_per_point: f32) -> Self {
        self.pixels_per_point = Some(pixels_per_point);
        self
    }

    pub fn pixels_per_point(&self) -> Option<f32> {
        self.pixels_per_point
    }

    pub fn with_window_size(mut self, width: f32, height: f32) -> Self {
        self.window_size = [width, height];
        self
    }

    pub fn window_size(&self) -> [f32; 2] {
        self.window_size
    }

    /// Applies `--theme`, `--scale` (alias `--pixels-per-point`) and `--size`.
    /// Other arguments are left for the notebook to interpret.
    pub fn with_args<I>(mut self, args: I) -> Result<Self, ArgError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--theme" => {
                    let value = args.next().ok_or(ArgError::MissingValue("--theme"))?;
                    self.theme = match value.as_str() {
                        "light" => Some(egui::ThemePreference::Light),
                        "dark" => Some(egui::ThemePreference::Dark),
                        "system" => None,
                        _ => return Err(ArgError::InvalidTheme(value)),
                    };
                }
                "--scale" | "--pixels-per-point" => {
                    let value = args.next().ok_or(ArgError::MissingValue("--scale"))?;
                    match value.parse::<f32>() {
                        Ok(scale) if scale > 0.0 && scale.is_finite() => {
                            self.pixels_per_point = Some(scale);
                        }
                        _ => return Err(ArgError::InvalidScale(value)),
                    }
                }
                "--size" => {
                    let value = args.next().ok_or(ArgError::MissingValue("--size"))?;
                    self.window_size =
                        parse_size(&value).ok_or_else(|| ArgError::InvalidSize(value.clone()))?;
                }
                _ => {}
            }
        }
        Ok(self)
    }

    /// Registers the notebook's cards by calling `body` once, then opens the window.
    pub fn run(self, body: impl FnOnce(&mut NotebookCtx)) -> eframe::Result<()> {
        init_logging();

        let mut nb = NotebookCtx::new();
        body(&mut nb);
        let notebook = nb.into_notebook(self.name.clone());
        tracing::info!(name = %self.name, cards = notebook.len(), "opening notebook");

        let theme = self.theme.unwrap_or_else(system_theme);
        let pixels_per_point = self.pixels_per_point;
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_title(self.name.as_str())
                .with_inner_size(self.window_size)
                .with_min_inner_size([480.0, 360.0]),
            ..Default::default()
        };

        eframe::run_native(
            &self.name,
            options,
            Box::new(move |cc| {
                let ctx = &cc.egui_ctx;
                themes::install(ctx);
                ctx.set_theme(theme);
                if let Some(scale) = pixels_per_point {
                    ctx.set_zoom_factor(scale);
                }
                install_interrupt_handler(ctx.clone());
                Ok(Box::new(notebook))
            }),
        )
    }
}

fn parse_size(value: &str) -> Option<[f32; 2]> {
    let (width, height) = value.split_once(['x', 'X'])?;
    let width = width.trim().parse::<f32>().ok()?;
    let height = height.trim().parse::<f32>().ok()?;
    (width > 0.0 && height > 0.0).then_some([width, height])
}

fn system_theme() -> egui::ThemePreference {
    match dark_light::detect() {
        Ok(Mode::Light) => egui::ThemePreference::Light,
        Ok(Mode::Dark) => egui::ThemePreference::Dark,
        Ok(Mode::Unspecified) | Err(_) => egui::ThemePreference::Dark,
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // A host application may already have installed a subscriber.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn install_interrupt_handler(ctx: egui::Context) {
    let result = ctrlc::set_handler(move || {
        tracing::info!("interrupted, closing notebook");
        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        ctx.request_repaint();
    });
    if let Err(err) = result {
        tracing::warn!(error = %err, "could not install ctrl-c handler");
    }
}

/// Collects the cards of a notebook while its body function runs.
pub struct NotebookCtx {
    cards: Vec<Box<dyn Card>>,
    pub(crate) state_store: Arc<StateStore>,
}

impl Default for NotebookCtx {
    fn default() -> Self {
        Self::new()
    }
}

impl NotebookCtx {
    pub fn new() -> Self {
        Self {
            cards: Vec::new(),
            state_store: Arc::new(StateStore::default()),
        }
    }

    pub fn push(&mut self, card: Box<dyn Card>) {
        self.cards.push(card);
    }

    /// Adds a card without state of its own.
    pub fn view(&mut self, function: impl FnMut(&mut CardContext) + 'static) {
        cards::stateless_card(self, function);
    }

    /// Adds a card owning the value stored under `key`.
    pub fn state<T: Send + Sync + 'static>(
        &mut self,
        key: &str,
        init: T,
        function: impl FnMut(&mut CardContext, &mut T) + 'static,
    ) -> StateId<T> {
        cards::stateful_card(self, key, init, function)
    }

    pub fn store(&self) -> &StateStore {
        &self.state_store
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn into_notebook(self, name: impl Into<String>) -> Notebook {
        Notebook {
            name: name.into(),
            cards: self.cards,
            state_store: self.state_store,
        }
    }
}

/// A finished notebook: its cards, drawn top to bottom every frame.
pub struct Notebook {
    name: String,
    cards: Vec<Box<dyn Card>>,
    state_store: Arc<StateStore>,
}

impl Notebook {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn store(&self) -> &StateStore {
        &self.state_store
    }

    /// Draws every card into the central panel of `ctx`.
    pub fn show(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| {
                    let width = ui.available_width().min(CONTENT_WIDTH);
                    let side = ((ui.available_width() - width) / 2.0).max(0.0);
                    ui.horizontal_top(|ui| {
                        ui.add_space(side);
                        ui.vertical(|ui| {
                            ui.set_width(width);
                            self.draw_cards(ui);
                        });
                    });
                });
        });
    }

    fn draw_cards(&mut self, ui: &mut egui::Ui) {
        let store = Arc::clone(&self.state_store);
        for (index, card) in self.cards.iter_mut().enumerate() {
            ui.push_id(("card", index), |ui| {
                let stroke = ui.visuals().widgets.noninteractive.bg_stroke;
                egui::Frame::new()
                    .fill(ui.visuals().faint_bg_color)
                    .stroke(stroke)
                    .show(ui, |ui| {
                        ui.set_width(ui.available_width());
                        let mut ctx = CardContext::new(ui, &store);
                        card.draw(&mut ctx);
                    });
            });
            ui.add_space(CARD_GAP);
        }
    }
}

impl eframe::App for Notebook {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.show(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|arg| arg.to_string()).collect()
    }

    #[test]
    fn no_flags_keep_defaults() {
        let config = NotebookConfig::new("Introduction")
            .with_args(args(&["unrelated", "--other"]))
            .unwrap();
        assert_eq!(config.name(), "Introduction");
        assert_eq!(config.theme(), None);
        assert_eq!(config.pixels_per_point(), None);
        assert_eq!(config.window_size(), DEFAULT_WINDOW_SIZE);
    }

    #[test]
    fn flags_are_applied() {
        let config = NotebookConfig::new("nb")
            .with_args(args(&["--theme", "light", "--scale", "1.5", "--size", "640x480"]))
            .unwrap();
        assert_eq!(config.theme(), Some(egui::ThemePreference::Light));
        assert_eq!(config.pixels_per_point(), Some(1.5));
        assert_eq!(config.window_size(), [640.0, 480.0]);
    }

    #[test]
    fn system_theme_clears_an_explicit_one() {
        let config = NotebookConfig::new("nb")
            .with_theme(egui::ThemePreference::Dark)
            .with_args(args(&["--theme", "system"]))
            .unwrap();
        assert_eq!(config.theme(), None);
    }

    #[test]
    fn invalid_flags_are_rejected() {
        let err = |list: &[&str]| NotebookConfig::new("nb").with_args(args(list)).unwrap_err();
        assert_eq!(err(&["--theme"]), ArgError::MissingValue("--theme"));
        assert_eq!(
            err(&["--theme", "sepia"]),
            ArgError::InvalidTheme("sepia".to_owned())
        );
        assert_eq!(err(&["--scale", "0"]), ArgError::InvalidScale("0".to_owned()));
        assert_eq!(err(&["--scale", "big"]), ArgError::InvalidScale("big".to_owned()));
        assert_eq!(err(&["--size", "640"]), ArgError::InvalidSize("640".to_owned()));
        assert_eq!(err(&["--size", "0x10"]), ArgError::InvalidSize("0x10".to_owned()));
    }

    #[test]
    fn cards_are_registered_in_order() {
        let mut nb = NotebookCtx::new();
        nb.view(|_| {});
        let counter = nb.state("counter", 0_u32, |_, value| *value += 1);
        nb.view(|_| {});
        assert_eq!(nb.len(), 3);
        assert_eq!(*counter.read_in(nb.store()), 0);

        let mut notebook = nb.into_notebook("order");
        let ctx = egui::Context::default();
        for _ in 0..3 {
            let _ = ctx.run(egui::RawInput::default(), |ctx| notebook.show(ctx));
        }
        assert_eq!(*counter.read_in(notebook.store()), 3);
    }
}
