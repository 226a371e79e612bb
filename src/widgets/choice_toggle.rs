use eframe::egui::{
    self, pos2, vec2, NumExt as _, Rect, Response, Sense, Stroke, TextStyle, Ui, Widget,
    WidgetInfo, WidgetText, WidgetType,
};

use crate::themes::IntroChoiceToggleStyle;

/// A row of segments of which exactly one is selected, like a select box that keeps
/// every option visible.
#[must_use = "You should put this widget in a ui with `ui.add(widget);`"]
pub struct ChoiceToggle<'a, T> {
    value: &'a mut T,
    choices: Vec<(T, WidgetText)>,
    style: Option<IntroChoiceToggleStyle>,
}

impl<'a, T: PartialEq + Clone> ChoiceToggle<'a, T> {
    pub fn new(value: &'a mut T) -> Self {
        Self {
            value,
            choices: Vec::new(),
            style: None,
        }
    }

    pub fn choice(mut self, value: T, label: impl Into<WidgetText>) -> Self {
        self.choices.push((value, label.into()));
        self
    }

    /// Adds one segment per item, labelled with its `Display` text.
    pub fn choices<I>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: std::fmt::Display,
    {
        for value in values {
            let label = value.to_string();
            self.choices.push((value, label.into()));
        }
        self
    }
}

/// Index of the segment that should read as selected.
pub(crate) fn selected_index<T: PartialEq>(value: &T, choices: &[T]) -> Option<usize> {
    choices.iter().position(|choice| choice == value)
}

impl<T: PartialEq + Clone> Widget for ChoiceToggle<'_, T> {
    fn ui(self, ui: &mut Ui) -> Response {
        let Self {
            value,
            choices,
            style,
        } = self;

        let enabled = ui.is_enabled();
        let gstyle = style.unwrap_or_else(|| IntroChoiceToggleStyle::from(ui.style().as_ref()));
        let shadow_inset = vec2(
            gstyle.shadow_offset.x.max(0.0),
            gstyle.shadow_offset.y.max(0.0),
        );
        let padding = ui.spacing().button_padding;
        let text_style = TextStyle::Button;
        let led_h = 3.0;

        let (values, labels): (Vec<T>, Vec<WidgetText>) = choices.into_iter().unzip();
        let galleys: Vec<_> = labels
            .into_iter()
            .map(|label| {
                label.into_galley(
                    ui,
                    Some(egui::TextWrapMode::Extend),
                    f32::INFINITY,
                    text_style.clone(),
                )
            })
            .collect();

        let segment_sizes: Vec<_> = galleys
            .iter()
            .map(|galley| {
                let mut size = galley.size() + padding * 2.0 + vec2(0.0, led_h);
                size.y = size.y.at_least(ui.spacing().interact_size.y);
                size
            })
            .collect();
        let gap = gstyle.segment_gap;
        let inner_width: f32 = segment_sizes.iter().map(|size| size.x).sum::<f32>()
            + gap * (segment_sizes.len().saturating_sub(1) as f32);
        let inner_height = segment_sizes
            .iter()
            .map(|size| size.y)
            .fold(ui.spacing().interact_size.y, f32::max);
        let desired = vec2(inner_width + gap * 2.0, inner_height + gap * 2.0) + shadow_inset;

        let (outer_rect, mut response) = ui.allocate_exact_size(desired, Sense::hover());
        let slot_rect = Rect::from_min_max(outer_rect.min, outer_rect.max - shadow_inset);

        let mut x = slot_rect.left() + gap;
        let mut changed = false;
        let mut segments = Vec::with_capacity(values.len());
        for (index, size) in segment_sizes.iter().enumerate() {
            let rect = Rect::from_min_size(pos2(x, slot_rect.top() + gap), vec2(size.x, inner_height));
            let id = response.id.with(("choice", index));
            let segment = ui.interact(rect, id, Sense::click());
            if enabled && segment.clicked() && *value != values[index] {
                *value = values[index].clone();
                changed = true;
            }
            segments.push((rect, segment));
            x += size.x + gap;
        }
        if changed {
            response.mark_changed();
        }

        let selected = selected_index(value, &values);
        let selected_label = selected
            .map(|index| galleys[index].text().to_owned())
            .unwrap_or_default();
        response.widget_info(move || {
            WidgetInfo::selected(WidgetType::RadioGroup, enabled, true, selected_label.as_str())
        });

        if !ui.is_rect_visible(outer_rect) {
            return response;
        }

        let painter = ui.painter();
        painter.rect_filled(
            slot_rect.translate(gstyle.shadow_offset),
            gstyle.slot_rounding,
            gstyle.shadow,
        );
        painter.rect_filled(slot_rect, gstyle.slot_rounding, gstyle.rail_bg);

        let led_off = crate::themes::blend(gstyle.led_on, gstyle.fill, gstyle.led_off_towards_fill);
        for (index, ((rect, segment), galley)) in segments.into_iter().zip(galleys).enumerate() {
            let is_selected = selected == Some(index);
            let is_down = enabled && segment.is_pointer_button_down_on();
            let fill = if enabled {
                gstyle.fill
            } else {
                crate::themes::blend(gstyle.fill, ui.visuals().window_fill, 0.65)
            };
            let stroke_color = if enabled && (segment.hovered() || is_down) {
                gstyle.accent
            } else {
                gstyle.outline
            };

            painter.rect_filled(rect, gstyle.segment_rounding, fill);
            painter.rect_stroke(
                rect,
                gstyle.segment_rounding,
                Stroke::new(1.0, stroke_color),
                egui::StrokeKind::Inside,
            );

            let led_rect = Rect::from_min_max(
                pos2(rect.left() + 4.0, rect.bottom() - led_h - 3.0),
                pos2(rect.right() - 4.0, rect.bottom() - 3.0),
            );
            let led_color = if is_selected { gstyle.led_on } else { led_off };
            painter.rect_filled(led_rect, 0.0, led_color);

            let text_color = if enabled {
                crate::themes::ral(9011)
            } else {
                crate::themes::blend(crate::themes::ral(9011), fill, 0.55)
            };
            let text_pos = pos2(
                rect.center().x - galley.size().x / 2.0,
                rect.center().y - (galley.size().y + led_h) / 2.0,
            );
            painter.galley(text_pos, galley, text_color);
        }

        response
    }
}

impl<T> crate::themes::Styled for ChoiceToggle<'_, T> {
    type Style = IntroChoiceToggleStyle;

    fn set_style(&mut self, style: Option<Self::Style>) {
        self.style = style;
    }
}
