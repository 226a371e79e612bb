use std::ops::RangeInclusive;

use eframe::egui::{
    self, emath::Numeric, pos2, vec2, Key, Rect, Response, Sense, Stroke, TextStyle, Ui, Widget,
    WidgetInfo, WidgetText,
};

use crate::themes::{IntroSliderStyle, LCD_TEXT_STYLE};

/// Horizontal slider over an inclusive numeric range.
///
/// Integer types step by whole numbers. Arrow keys nudge the value by one step while
/// the slider has focus.
#[must_use = "You should put this widget in a ui with `ui.add(widget);`"]
pub struct Slider<'a, Num: Numeric> {
    value: &'a mut Num,
    range: RangeInclusive<Num>,
    text: Option<WidgetText>,
    step: Option<f64>,
    show_value: bool,
    style: Option<IntroSliderStyle>,
}

impl<'a, Num: Numeric> Slider<'a, Num> {
    pub fn new(value: &'a mut Num, range: RangeInclusive<Num>) -> Self {
        Self {
            value,
            range,
            text: None,
            step: None,
            show_value: true,
            style: None,
        }
    }

    /// Text shown to the right of the value readout.
    pub fn text(mut self, text: impl Into<WidgetText>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Snap to multiples of `step` (counted from the range start).
    pub fn step_by(mut self, step: f64) -> Self {
        self.step = (step > 0.0).then_some(step);
        self
    }

    pub fn show_value(mut self, show_value: bool) -> Self {
        self.show_value = show_value;
        self
    }

    fn effective_step(&self) -> Option<f64> {
        match self.step {
            Some(step) => Some(step),
            None if Num::INTEGRAL => Some(1.0),
            None => None,
        }
    }
}

/// Maps a position in `[0, 1]` onto the range, snapping to `step` and clamping.
pub(crate) fn value_from_fraction(fraction: f64, min: f64, max: f64, step: Option<f64>) -> f64 {
    let fraction = fraction.clamp(0.0, 1.0);
    let raw = min + (max - min) * fraction;
    snap(raw, min, max, step)
}

pub(crate) fn snap(value: f64, min: f64, max: f64, step: Option<f64>) -> f64 {
    let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
    let snapped = match step {
        Some(step) => min + ((value - min) / step).round() * step,
        None => value,
    };
    snapped.clamp(lo, hi)
}

pub(crate) fn fraction_from_value(value: f64, min: f64, max: f64) -> f64 {
    if max == min {
        return 0.0;
    }
    ((value - min) / (max - min)).clamp(0.0, 1.0)
}

impl<Num: Numeric> Widget for Slider<'_, Num> {
    fn ui(self, ui: &mut Ui) -> Response {
        let step = self.effective_step();
        let Self {
            value,
            range,
            text,
            show_value,
            style,
            ..
        } = self;

        let min = range.start().to_f64();
        let max = range.end().to_f64();
        let gstyle = style.unwrap_or_else(|| IntroSliderStyle::from(ui.style().as_ref()));
        let enabled = ui.is_enabled();

        let mut current = snap(value.to_f64(), min, max, step);

        let inner = ui.horizontal(|ui| {
            let rail_size = vec2(ui.spacing().slider_width, ui.spacing().interact_size.y);
            let (rect, mut response) = ui.allocate_exact_size(rail_size, Sense::click_and_drag());
            let knob_half = gstyle.knob_width / 2.0;
            let travel = rect.shrink2(vec2(knob_half, 0.0));

            if let Some(pointer) = response.interact_pointer_pos() {
                let fraction = f64::from((pointer.x - travel.left()) / travel.width().max(1.0));
                current = value_from_fraction(fraction, min, max, step);
            }

            if response.has_focus() {
                let nudge = step.unwrap_or((max - min).abs() / 100.0);
                let direction = if min <= max { 1.0 } else { -1.0 };
                ui.input(|input| {
                    if input.key_pressed(Key::ArrowRight) || input.key_pressed(Key::ArrowUp) {
                        current = snap(current + nudge * direction, min, max, step);
                    }
                    if input.key_pressed(Key::ArrowLeft) || input.key_pressed(Key::ArrowDown) {
                        current = snap(current - nudge * direction, min, max, step);
                    }
                });
            }

            let new_value = Num::from_f64(current);
            if new_value.to_f64() != value.to_f64() {
                *value = new_value;
                response.mark_changed();
            }

            let fraction = fraction_from_value(value.to_f64(), min, max) as f32;
            if ui.is_rect_visible(rect) {
                let visuals = ui.visuals();
                let painter = ui.painter();
                let rail_h = 6.0;
                let rail = Rect::from_center_size(rect.center(), vec2(rect.width(), rail_h));
                painter.rect_filled(rail, 1.0, gstyle.rail_bg);

                let knob_x = travel.left() + travel.width() * fraction;
                let filled = Rect::from_min_max(rail.min, pos2(knob_x, rail.max.y));
                painter.rect_filled(filled, 1.0, visuals.selection.stroke.color);

                let knob = Rect::from_center_size(
                    pos2(knob_x, rect.center().y),
                    vec2(gstyle.knob_width, rect.height() - gstyle.shadow_offset.y),
                );
                let is_down = enabled && response.is_pointer_button_down_on();
                let knob = if is_down {
                    knob.translate(gstyle.shadow_offset)
                } else {
                    painter.rect_filled(knob.translate(gstyle.shadow_offset), 2.0, gstyle.shadow);
                    knob
                };
                let outline = if response.hovered() || response.has_focus() || is_down {
                    visuals.selection.stroke.color
                } else {
                    gstyle.rail_fill
                };
                painter.rect_filled(knob, 2.0, gstyle.knob);
                painter.rect_stroke(
                    knob,
                    2.0,
                    Stroke::new(1.0, outline),
                    egui::StrokeKind::Inside,
                );
            }

            if show_value {
                let readout = if Num::INTEGRAL {
                    format!("{}", value.to_f64() as i64)
                } else {
                    format!("{:.2}", value.to_f64())
                };
                ui.label(
                    egui::RichText::new(readout)
                        .text_style(TextStyle::Name(LCD_TEXT_STYLE.into())),
                );
            }
            if let Some(text) = text {
                ui.label(text);
            }

            let reported = value.to_f64();
            response.widget_info(|| WidgetInfo::slider(enabled, reported, ""));
            response
        });

        inner.inner
    }
}

impl<Num: Numeric> crate::themes::Styled for Slider<'_, Num> {
    type Style = IntroSliderStyle;

    fn set_style(&mut self, style: Option<Self::Style>) {
        self.style = style;
    }
}
