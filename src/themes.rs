use egui::style::{Selection, WidgetVisuals, Widgets};
use egui::{Color32, FontFamily, FontId, Stroke, Style, TextStyle, Vec2, Visuals};

mod style;
pub use style::Styled;
pub mod ral;
use ral::RAL_COLORS;

/// Name of the text style used for values shown in "display" widgets.
pub const LCD_TEXT_STYLE: &str = "LCD";

/// Semantic style for the `Slider` widget.
#[derive(Clone, Debug)]
pub struct IntroSliderStyle {
    pub rail_bg: Color32,
    pub rail_fill: Color32,
    pub knob: Color32,
    pub shadow: Color32,
    pub shadow_offset: Vec2,
    pub knob_width: f32,
}

/// Semantic style for the `Button` widget.
#[derive(Clone, Debug)]
pub struct IntroButtonStyle {
    pub fill: Color32,
    pub outline: Color32,
    pub accent: Color32,
    pub shadow: Color32,
    pub shadow_offset: Vec2,
    pub rounding: f32,
}

/// Semantic style for the `ChoiceToggle` widget.
#[derive(Clone, Debug)]
pub struct IntroChoiceToggleStyle {
    pub fill: Color32,
    pub outline: Color32,
    pub accent: Color32,
    pub shadow: Color32,
    pub shadow_offset: Vec2,
    pub slot_rounding: f32,
    pub segment_rounding: u8,
    pub rail_bg: Color32,
    pub segment_gap: f32,
    pub led_on: Color32,
    pub led_off_towards_fill: f32,
}

/// Semantic style for the `TextField` widget.
#[derive(Clone, Debug)]
pub struct IntroTextFieldStyle {
    pub fill: Color32,
    pub outline: Color32,
    pub accent: Color32,
    pub rounding: f32,
    pub scanline_height: f32,
}

/// Semantic style for the CSV drop zone.
#[derive(Clone, Debug)]
pub struct IntroDropZoneStyle {
    pub fill: Color32,
    pub hover_fill: Color32,
    pub outline: Color32,
    pub accent: Color32,
    pub dash_length: f32,
}

pub fn slider_style(_dark_mode: bool) -> IntroSliderStyle {
    let outline = blend(ral(9011), ral(7047), 0.4);

    IntroSliderStyle {
        rail_bg: ral(9004),
        rail_fill: outline,
        knob: ral(9003),
        shadow: ral(9004),
        shadow_offset: egui::vec2(2.0, 2.0),
        knob_width: 14.0,
    }
}

impl From<&Style> for IntroSliderStyle {
    fn from(style: &Style) -> Self {
        slider_style(style.visuals.dark_mode)
    }
}

impl From<&Style> for IntroButtonStyle {
    fn from(style: &Style) -> Self {
        let base = IntroSliderStyle::from(style);
        Self {
            fill: base.knob,
            outline: base.rail_fill,
            accent: style.visuals.selection.stroke.color,
            shadow: base.shadow,
            shadow_offset: base.shadow_offset,
            rounding: 2.0,
        }
    }
}

impl From<&Style> for IntroChoiceToggleStyle {
    fn from(style: &Style) -> Self {
        let base = IntroSliderStyle::from(style);
        Self {
            fill: base.knob,
            outline: base.rail_fill,
            accent: style.visuals.selection.stroke.color,
            shadow: base.shadow,
            shadow_offset: base.shadow_offset,
            slot_rounding: 2.0,
            segment_rounding: 2,
            rail_bg: base.rail_bg,
            segment_gap: 2.0,
            led_on: ral(2005),
            led_off_towards_fill: 0.25,
        }
    }
}

impl From<&Style> for IntroTextFieldStyle {
    fn from(style: &Style) -> Self {
        let dark_mode = style.visuals.dark_mode;
        Self {
            fill: if dark_mode { ral(9004) } else { ral(6027) },
            outline: if dark_mode { ral(6027) } else { ral(9011) },
            accent: style.visuals.selection.stroke.color,
            rounding: 0.0,
            scanline_height: 3.0,
        }
    }
}

impl From<&Style> for IntroDropZoneStyle {
    fn from(style: &Style) -> Self {
        let visuals = &style.visuals;
        let fill = visuals.faint_bg_color;
        Self {
            fill,
            hover_fill: blend(fill, visuals.selection.stroke.color, 0.15),
            outline: visuals.widgets.noninteractive.bg_stroke.color,
            accent: visuals.selection.stroke.color,
            dash_length: 6.0,
        }
    }
}

// Color utilities: simple sRGB linear interpolation for quick palette derivation
pub fn blend(a: Color32, b: Color32, t: f32) -> Color32 {
    let r = (a.r() as f32 * (1.0 - t) + b.r() as f32 * t).round() as u8;
    let g = (a.g() as f32 * (1.0 - t) + b.g() as f32 * t).round() as u8;
    let bch = (a.b() as f32 * (1.0 - t) + b.b() as f32 * t).round() as u8;
    Color32::from_rgb(r, g, bch)
}

pub fn ral(num: u16) -> Color32 {
    RAL_COLORS
        .iter()
        .find(|(code, _, _)| *code == num)
        .map(|(_, _, c)| *c)
        .unwrap_or(Color32::from_rgb(0, 0, 0))
}

/// Text color for LCD-style values on top of a text field fill.
pub fn lcd_text_color(dark_mode: bool) -> Color32 {
    if dark_mode {
        ral(6027)
    } else {
        ral(9011)
    }
}

/// Build visuals from the RAL palette for a clean, industrial feel.
pub fn industrial(
    foreground: Color32,
    background: Color32,
    surface: Color32,
    accent: Color32,
    mut base_visuals: Visuals,
) -> Visuals {
    let surface_muted = blend(surface, background, 0.2);
    let border = blend(foreground, background, 0.4);
    let weak_text = blend(foreground, background, 0.55);
    let control_radius = 2.0;
    let container_radius = 0.0;

    let control_fill = background;
    let control_fill_hover = blend(background, foreground, 0.05);
    let control_fill_active = blend(control_fill_hover, ral(9011), 0.12);
    let selection_fill = blend(background, foreground, 0.12);

    base_visuals.window_fill = background;
    base_visuals.panel_fill = background;
    base_visuals.override_text_color = None;
    base_visuals.weak_text_color = Some(weak_text);
    base_visuals.faint_bg_color = surface_muted;
    base_visuals.extreme_bg_color = control_fill_hover;
    base_visuals.selection = Selection {
        bg_fill: selection_fill,
        stroke: Stroke::new(1.5, accent),
    };
    base_visuals.hyperlink_color = ral(5005);
    base_visuals.window_stroke = Stroke::new(1.0, border);

    let border_stroke = Stroke::new(1.0, border);
    let hover_stroke = Stroke::new(1.4, border);
    let active_stroke = Stroke::new(1.4, accent);
    let widget = |fill: Color32, bg_stroke: Stroke, radius: f32| WidgetVisuals {
        bg_fill: fill,
        weak_bg_fill: fill,
        bg_stroke,
        fg_stroke: Stroke::new(1.0, foreground),
        corner_radius: radius.into(),
        expansion: 0.0,
    };

    base_visuals.widgets = Widgets {
        noninteractive: widget(surface, border_stroke, container_radius),
        inactive: widget(control_fill, border_stroke, control_radius),
        hovered: widget(control_fill_hover, hover_stroke, control_radius),
        active: widget(control_fill_active, active_stroke, control_radius),
        open: widget(control_fill_hover, active_stroke, control_radius),
    };

    base_visuals.window_shadow = egui::epaint::Shadow::NONE;
    base_visuals.popup_shadow = egui::epaint::Shadow {
        offset: [4, 4],
        blur: 0,
        spread: 0,
        color: ral(9004),
    };

    base_visuals
}

fn industrial_style(visuals: Visuals) -> Style {
    let mut style = Style {
        text_styles: industrial_text_styles().into_iter().collect(),
        ..Default::default()
    };

    style.spacing.item_spacing = egui::vec2(12.0, 10.0);
    style.spacing.button_padding = egui::vec2(12.0, 8.0);
    style.spacing.indent = 18.0;
    style.spacing.slider_width = 240.0;
    style.spacing.interact_size = egui::vec2(34.0, 26.0);
    style.animation_time = 0.12;

    style.visuals = visuals;
    style
}

pub fn industrial_light() -> Style {
    industrial_style(industrial(
        ral(9011),
        ral(7047),
        ral(7047),
        ral(2009),
        Visuals::light(),
    ))
}

pub fn industrial_dark() -> Style {
    industrial_style(industrial(
        ral(9003),
        ral(7046),
        ral(7047),
        ral(2009),
        Visuals::dark(),
    ))
}

/// Installs the light and dark industrial styles on `ctx`.
pub fn install(ctx: &egui::Context) {
    ctx.set_style_of(egui::Theme::Light, industrial_light());
    ctx.set_style_of(egui::Theme::Dark, industrial_dark());
}

pub fn industrial_text_styles() -> Vec<(TextStyle, FontId)> {
    vec![
        (TextStyle::Heading, FontId::new(30.0, FontFamily::Proportional)),
        (TextStyle::Body, FontId::new(16.0, FontFamily::Proportional)),
        (
            TextStyle::Name(LCD_TEXT_STYLE.into()),
            FontId::new(16.0, FontFamily::Monospace),
        ),
        (TextStyle::Monospace, FontId::new(14.0, FontFamily::Monospace)),
        (TextStyle::Button, FontId::new(16.0, FontFamily::Proportional)),
        (TextStyle::Small, FontId::new(12.0, FontFamily::Proportional)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blend_endpoints() {
        let a = Color32::from_rgb(0, 0, 0);
        let b = Color32::from_rgb(200, 100, 50);
        assert_eq!(blend(a, b, 0.0), a);
        assert_eq!(blend(a, b, 1.0), b);
        assert_eq!(blend(a, b, 0.5), Color32::from_rgb(100, 50, 25));
    }

    #[test]
    fn unknown_ral_code_is_black() {
        assert_eq!(ral(1), Color32::from_rgb(0, 0, 0));
        assert_ne!(ral(2009), Color32::from_rgb(0, 0, 0));
    }

    #[test]
    fn styles_define_lcd_text() {
        for style in [industrial_light(), industrial_dark()] {
            assert!(style
                .text_styles
                .contains_key(&TextStyle::Name(LCD_TEXT_STYLE.into())));
        }
        assert!(industrial_dark().visuals.dark_mode);
        assert!(!industrial_light().visuals.dark_mode);
    }
}
