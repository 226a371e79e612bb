use eframe::egui::{self, pos2, Color32, Rect, Response, Stroke, TextEdit, Ui, Widget};

use crate::themes::{lcd_text_color, IntroTextFieldStyle, LCD_TEXT_STYLE};

fn paint_scanline(painter: &egui::Painter, rect: Rect, color: Color32, height: f32) {
    let inset = 2.0;
    let available_h = (rect.height() - inset * 2.0).max(0.0);
    let height = height.min(available_h);
    if height <= 0.0 {
        return;
    }

    let y1 = rect.bottom() - inset;
    let y0 = y1 - height;
    let scan_rect = Rect::from_min_max(pos2(rect.left() + inset, y0), pos2(rect.right() - inset, y1));
    if scan_rect.is_positive() {
        painter.rect_filled(scan_rect, 0.0, color);
    }
}

/// Text input drawn as an LCD panel.
#[must_use = "You should put this widget in a ui with `ui.add(widget);`"]
pub struct TextField<'a> {
    inner: TextEdit<'a>,
    style: Option<IntroTextFieldStyle>,
}

impl<'a> TextField<'a> {
    pub fn new(inner: TextEdit<'a>) -> Self {
        Self { inner, style: None }
    }

    pub fn singleline(text: &'a mut dyn egui::TextBuffer) -> Self {
        Self::new(TextEdit::singleline(text))
    }

    pub fn hint_text(mut self, hint: impl Into<egui::WidgetText>) -> Self {
        self.inner = self.inner.hint_text(hint);
        self
    }

    pub fn desired_width(mut self, width: f32) -> Self {
        self.inner = self.inner.desired_width(width);
        self
    }
}

impl Widget for TextField<'_> {
    fn ui(self, ui: &mut Ui) -> Response {
        let Self { inner, style } = self;

        let enabled = ui.is_enabled();
        let gstyle = style.unwrap_or_else(|| IntroTextFieldStyle::from(ui.style().as_ref()));
        let fill = if enabled {
            gstyle.fill
        } else {
            crate::themes::blend(gstyle.fill, ui.visuals().window_fill, 0.65)
        };
        let base_text_color = lcd_text_color(ui.visuals().dark_mode);
        let text_color = if enabled {
            base_text_color
        } else {
            crate::themes::blend(base_text_color, fill, 0.55)
        };

        ui.scope(|ui| {
            let visuals = ui.visuals_mut();
            visuals.override_text_color = Some(text_color);
            visuals.text_edit_bg_color = Some(fill);
            visuals.extreme_bg_color = fill;

            let outline_stroke = Stroke::new(1.0, gstyle.outline);
            visuals.selection.stroke = outline_stroke;
            for state in [
                &mut visuals.widgets.inactive,
                &mut visuals.widgets.hovered,
                &mut visuals.widgets.active,
                &mut visuals.widgets.open,
            ] {
                state.bg_stroke = outline_stroke;
                state.bg_fill = fill;
                state.weak_bg_fill = fill;
                state.corner_radius = gstyle.rounding.into();
            }

            let response = ui.add(
                inner
                    .font(egui::TextStyle::Name(LCD_TEXT_STYLE.into()))
                    .frame(true)
                    .margin(ui.spacing().button_padding)
                    .min_size(ui.spacing().interact_size),
            );

            if enabled && response.has_focus() && ui.is_rect_visible(response.rect) {
                paint_scanline(
                    ui.painter(),
                    response.rect,
                    base_text_color,
                    gstyle.scanline_height,
                );
            }

            response
        })
        .inner
    }
}

impl crate::themes::Styled for TextField<'_> {
    type Style = IntroTextFieldStyle;

    fn set_style(&mut self, style: Option<Self::Style>) {
        self.style = style;
    }
}
