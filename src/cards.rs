pub mod stateful_card;
pub mod stateless_card;

use std::ops::{Deref, DerefMut};

use eframe::egui;
pub use stateful_card::*;
pub use stateless_card::*;

use crate::state::StateStore;

/// Inner margin used by the notebook's own cards.
pub const DEFAULT_CARD_PADDING: egui::Margin = egui::Margin::symmetric(16, 12);

pub trait Card {
    fn draw(&mut self, ctx: &mut CardContext);
}

/// The `Ui` a card draws into, plus access to the notebook's shared state.
pub struct CardContext<'a> {
    pub(crate) ui: &'a mut egui::Ui,
    pub(crate) store: &'a StateStore,
}

impl<'a> CardContext<'a> {
    pub fn new(ui: &'a mut egui::Ui, store: &'a StateStore) -> Self {
        Self { ui, store }
    }

    pub fn store(&self) -> &StateStore {
        self.store
    }

    pub fn ui_mut(&mut self) -> &mut egui::Ui {
        self.ui
    }
}

impl Deref for CardContext<'_> {
    type Target = egui::Ui;

    fn deref(&self) -> &Self::Target {
        self.ui
    }
}

impl DerefMut for CardContext<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.ui
    }
}

pub fn with_padding<R>(
    ctx: &mut CardContext,
    padding: egui::Margin,
    add_contents: impl FnOnce(&mut CardContext) -> R,
) -> R {
    let store = ctx.store;
    egui::Frame::new()
        .inner_margin(padding)
        .show(ctx.ui, |ui| {
            ui.set_width(ui.available_width());
            let mut ctx = CardContext::new(ui, store);
            add_contents(&mut ctx)
        })
        .inner
}
