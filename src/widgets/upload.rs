use eframe::egui::{self, vec2, Align, Layout, Rect, RichText, Sense, Stroke};

use crate::themes::{IntroButtonStyle, IntroDropZoneStyle, IntroTextFieldStyle, Styled};
use crate::upload::CsvUpload;
use crate::widgets::{Button, TextField};

pub struct CsvUploadResponse<'a> {
    /// A new file was selected this frame.
    pub selected: bool,
    /// The current file was cleared this frame.
    pub cleared: bool,
    /// The loaded table. `None` while nothing is selected or a read is running.
    pub table: Option<&'a polars::prelude::DataFrame>,
}

/// File picker for `.csv` files: a path field with Load/Clear, and a drop zone that
/// accepts files dragged onto the window.
#[must_use = "Use `CsvUploadWidget::show(ui)` to render this widget."]
pub struct CsvUploadWidget<'a> {
    state: &'a mut CsvUpload,
}

pub const UPLOAD_LABEL: &str = "Choose a csv file";

impl<'a> CsvUploadWidget<'a> {
    pub fn new(state: &'a mut CsvUpload) -> Self {
        Self { state }
    }

    pub fn show(self, ui: &mut egui::Ui) -> CsvUploadResponse<'a> {
        let Self { state } = self;
        let mut selected = false;
        let mut cleared = false;

        if state.poll() {
            ui.ctx().request_repaint();
        }

        ui.label(UPLOAD_LABEL);
        ui.add_space(4.0);

        let hovering = ui.ctx().input(|input| !input.raw.hovered_files.is_empty());
        let dropped = ui.ctx().input(|input| input.raw.dropped_files.clone());
        drop_zone(ui, hovering);
        if let Some(file) = dropped.into_iter().next() {
            match file.path {
                Some(path) => {
                    selected = state.select(path).is_ok();
                }
                None => {
                    log::warn!("dropped file '{}' has no path on disk", file.name);
                }
            }
        }

        let error_color = ui.visuals().error_fg_color;
        let mut clear_style = IntroButtonStyle::from(ui.style().as_ref());
        clear_style.accent = error_color;
        let mut field_style = IntroTextFieldStyle::from(ui.style().as_ref());
        if state.last_error().is_some() {
            field_style.outline = error_color;
        }

        ui.add_space(6.0);
        ui.with_layout(Layout::right_to_left(Align::Min), |ui| {
            if ui
                .add_enabled(state.is_active(), Button::new("Clear").styled(clear_style))
                .clicked()
            {
                state.clear();
                cleared = true;
            }
            let load = ui.add_enabled(!state.is_loading(), Button::new("Load"));
            let field = ui.add(
                TextField::singleline(state.path_input_mut())
                    .hint_text("path/to/file.csv")
                    .desired_width(ui.available_width())
                    .styled(field_style),
            );
            let submitted =
                field.lost_focus() && ui.input(|input| input.key_pressed(egui::Key::Enter));
            if load.clicked() || submitted {
                selected = matches!(state.submit(), Ok(true));
            }
        });

        if state.is_loading() {
            ui.add(egui::widgets::Spinner::new());
            ui.ctx().request_repaint();
        }

        if let Some(err) = state.last_error() {
            ui.add_space(6.0);
            ui.label(
                RichText::new(err)
                    .color(ui.visuals().error_fg_color)
                    .monospace(),
            );
        } else if let Some(source) = state.source().filter(|_| !state.is_loading()) {
            ui.label(RichText::new(format!("Showing {}", source.display())).small());
        }

        CsvUploadResponse {
            selected,
            cleared,
            table: state.table(),
        }
    }
}

fn drop_zone(ui: &mut egui::Ui, hovering: bool) {
    let gstyle = IntroDropZoneStyle::from(ui.style().as_ref());
    let height = ui.spacing().interact_size.y * 2.5;
    let (rect, _) = ui.allocate_exact_size(vec2(ui.available_width(), height), Sense::hover());
    if !ui.is_rect_visible(rect) {
        return;
    }

    let painter = ui.painter();
    let (fill, outline) = if hovering {
        (gstyle.hover_fill, gstyle.accent)
    } else {
        (gstyle.fill, gstyle.outline)
    };
    painter.rect_filled(rect, 0.0, fill);
    paint_dashed_rect(painter, rect.shrink(1.0), Stroke::new(1.0, outline), gstyle.dash_length);

    let text = if hovering {
        "Release to load"
    } else {
        "Drop a .csv file here"
    };
    painter.text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        text,
        egui::TextStyle::Body.resolve(ui.style()),
        ui.visuals().weak_text_color(),
    );
}

fn paint_dashed_rect(painter: &egui::Painter, rect: Rect, stroke: Stroke, dash: f32) {
    let corners = [
        rect.left_top(),
        rect.right_top(),
        rect.right_bottom(),
        rect.left_bottom(),
        rect.left_top(),
    ];
    painter.extend(egui::Shape::dashed_line(&corners, stroke, dash, dash * 0.6));
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::CsvUploadWidget;
    use crate::sample::{write_sample, SAMPLE_ROWS};
    use crate::themes;
    use crate::upload::CsvUpload;
    use eframe::egui;

    /// Draws one frame with `dropped` files and returns whether the widget reported a
    /// new selection.
    fn drop_files(ctx: &egui::Context, upload: &mut CsvUpload, dropped: Vec<PathBuf>) -> bool {
        let input = egui::RawInput {
            dropped_files: dropped
                .into_iter()
                .map(|path| egui::DroppedFile {
                    path: Some(path),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        };
        let mut selected = false;
        let _ = ctx.run(input, |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                selected = CsvUploadWidget::new(upload).show(ui).selected;
            });
        });
        selected
    }

    fn context() -> egui::Context {
        let ctx = egui::Context::default();
        themes::install(&ctx);
        ctx
    }

    #[test]
    fn dropping_a_csv_loads_its_table() {
        let dir = tempfile::tempdir().unwrap();
        let sample = write_sample(dir.path()).unwrap();
        let ctx = context();
        let mut upload = CsvUpload::new();

        assert!(!drop_files(&ctx, &mut upload, Vec::new()));
        assert!(!upload.is_active());

        assert!(drop_files(&ctx, &mut upload, vec![sample.path.clone()]));
        assert!(upload.is_active());
        upload.wait();

        let table = upload.table().expect("dropped table loaded");
        assert_eq!(table.height(), SAMPLE_ROWS);
        assert!(table.equals(&sample.frame));
        assert_eq!(upload.path_input(), sample.path.display().to_string());
    }

    #[test]
    fn dropping_another_file_type_reports_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let notes = dir.path().join("notes.txt");
        std::fs::write(&notes, "not a table\n").unwrap();
        let ctx = context();
        let mut upload = CsvUpload::new();

        assert!(!drop_files(&ctx, &mut upload, vec![notes]));
        assert!(!upload.is_active());
        assert!(upload.table().is_none());
        assert!(upload
            .last_error()
            .is_some_and(|err| err.contains("is not a .csv file")));

        // the error stays visible on the next frame
        assert!(!drop_files(&ctx, &mut upload, Vec::new()));
        assert!(upload.last_error().is_some());
    }
}
