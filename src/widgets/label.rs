use eframe::egui::{vec2, Align2, Response, Sense, TextStyle, TextWrapMode, Ui, WidgetText};

use crate::themes::{lcd_text_color, LCD_TEXT_STYLE};

/// Label sized to the control height, with vertically centered text.
pub fn row_label(ui: &mut Ui, text: impl Into<WidgetText>) -> Response {
    let text = text.into();
    let max_text_width = ui.available_width().max(0.0);
    let galley = text.into_galley(
        ui,
        Some(TextWrapMode::Extend),
        max_text_width,
        TextStyle::Name(LCD_TEXT_STYLE.into()),
    );

    let height = ui.spacing().interact_size.y.max(galley.size().y);
    let (rect, response) = ui.allocate_exact_size(vec2(galley.size().x, height), Sense::hover());

    if ui.is_rect_visible(rect) {
        let placement = Align2::LEFT_CENTER.align_size_within_rect(galley.size(), rect);
        let galley_pos = placement.min - galley.rect.min.to_vec2();
        ui.painter()
            .with_clip_rect(rect)
            .galley(galley_pos, galley, lcd_text_color(ui.visuals().dark_mode));
    }

    response
}

/// Restates a widget's current value, e.g. `Your age is : 42`.
pub fn echo(ui: &mut Ui, prefix: &str, value: impl std::fmt::Display) -> Response {
    ui.label(echo_text(prefix, value))
}

pub fn echo_text(prefix: &str, value: impl std::fmt::Display) -> String {
    format!("{prefix} : {value}")
}

#[cfg(test)]
mod tests {
    use super::echo_text;

    #[test]
    fn echo_keeps_the_spaced_colon() {
        assert_eq!(echo_text("Your Name is", "Ada"), "Your Name is : Ada");
        assert_eq!(echo_text("Your age is", 0), "Your age is : 0");
        assert_eq!(echo_text("Your Name is", ""), "Your Name is : ");
    }
}
