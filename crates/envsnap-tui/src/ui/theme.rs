// Centralized color palette and style helpers.
// Views ask the palette for styles instead of naming colors inline.

use ratatui::style::{Color, Modifier, Style};

// Accents are shared by both palettes
pub const ACCENT_PRIMARY: Color = Color::Rgb(86, 156, 214);
pub const ACCENT_SUCCESS: Color = Color::Rgb(106, 153, 85);
pub const ACCENT_WARNING: Color = Color::Rgb(206, 145, 120);
pub const ACCENT_ERROR: Color = Color::Rgb(244, 112, 112);

/// Temperature ramp endpoints in Celsius. Colder clamps to blue, warmer to red.
pub const TEMP_RAMP_MIN_C: f64 = -10.0;
pub const TEMP_RAMP_MAX_C: f64 = 35.0;
const TEMP_HUE_COLD: f64 = 220.0;
const TEMP_HUE_WARM: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
    Dark,
    Light,
}

/// Background and ink colors for one theme mode
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub bg_app: Color,
    pub bg_panel: Color,
    pub bg_selected: Color,
    pub bg_statusbar: Color,
    pub bg_modal: Color,
    pub ink: Color,
    pub text_primary: Color,
    pub text_muted: Color,
    pub text_dim: Color,
    pub border_active: Color,
    pub border_inactive: Color,
}

impl Palette {
    pub fn dark() -> Self {
        Self {
            bg_app: Color::Rgb(24, 24, 27),
            bg_panel: Color::Rgb(32, 32, 36),
            bg_selected: Color::Rgb(45, 45, 52),
            bg_statusbar: Color::Rgb(20, 20, 22),
            bg_modal: Color::Rgb(36, 36, 40),
            ink: Color::Rgb(220, 220, 225),
            text_primary: Color::Rgb(230, 230, 230),
            text_muted: Color::Rgb(150, 150, 155),
            text_dim: Color::Rgb(100, 100, 105),
            border_active: ACCENT_PRIMARY,
            border_inactive: Color::Rgb(60, 60, 66),
        }
    }

    pub fn light() -> Self {
        Self {
            bg_app: Color::Rgb(246, 246, 243),
            bg_panel: Color::Rgb(255, 255, 255),
            bg_selected: Color::Rgb(226, 232, 240),
            bg_statusbar: Color::Rgb(232, 232, 228),
            bg_modal: Color::Rgb(252, 252, 250),
            ink: Color::Rgb(34, 34, 34),
            text_primary: Color::Rgb(28, 28, 30),
            text_muted: Color::Rgb(96, 96, 100),
            text_dim: Color::Rgb(150, 150, 152),
            border_active: Color::Rgb(52, 110, 170),
            border_inactive: Color::Rgb(200, 200, 196),
        }
    }

    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Dark => Self::dark(),
            ThemeMode::Light => Self::light(),
        }
    }

    // ===== Styles =====

    pub fn app(&self) -> Style {
        Style::default().fg(self.text_primary).bg(self.bg_app)
    }

    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.text_primary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.text_muted)
    }

    pub fn dim(&self) -> Style {
        Style::default().fg(self.text_dim)
    }

    pub fn ink(&self) -> Style {
        Style::default().fg(self.ink)
    }

    pub fn selected_row(&self) -> Style {
        Style::default()
            .bg(self.bg_selected)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border(&self, active: bool) -> Style {
        if active {
            Style::default().fg(self.border_active)
        } else {
            Style::default().fg(self.border_inactive)
        }
    }

    pub fn modal_title(&self) -> Style {
        Style::default()
            .fg(self.text_primary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn modal_hint(&self) -> Style {
        Style::default().fg(self.text_dim)
    }
}

/// Hue in degrees for a temperature: 220 (blue) at -10 °C down to 20 (red)
/// at 35 °C, clamped at both ends.
pub fn temperature_hue(temp_c: f64) -> f64 {
    let t = temp_c.clamp(TEMP_RAMP_MIN_C, TEMP_RAMP_MAX_C);
    let ratio = (t - TEMP_RAMP_MIN_C) / (TEMP_RAMP_MAX_C - TEMP_RAMP_MIN_C);
    TEMP_HUE_COLD + (TEMP_HUE_WARM - TEMP_HUE_COLD) * ratio
}

/// Dot color for a reading. Missing readings get the dim text color.
pub fn temperature_color(temp_c: Option<f64>, palette: &Palette) -> Color {
    match temp_c {
        Some(t) if t.is_finite() => {
            let (r, g, b) = hsv_to_rgb(temperature_hue(t), 0.8, 0.9);
            Color::Rgb(r, g, b)
        }
        _ => palette.text_dim,
    }
}

fn hsv_to_rgb(hue: f64, saturation: f64, value: f64) -> (u8, u8, u8) {
    let h = hue.rem_euclid(360.0) / 60.0;
    let c = value * saturation;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let m = value - c;
    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let to_byte = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    (to_byte(r), to_byte(g), to_byte(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temperature_hue_clamps() {
        assert_eq!(temperature_hue(-40.0), 220.0);
        assert_eq!(temperature_hue(-10.0), 220.0);
        assert_eq!(temperature_hue(35.0), 20.0);
        assert_eq!(temperature_hue(50.0), 20.0);
        assert!((temperature_hue(12.5) - 120.0).abs() < 1e-9);
    }

    #[test]
    fn test_cold_is_blue_warm_is_red() {
        let palette = Palette::dark();
        let Color::Rgb(r, _, b) = temperature_color(Some(-10.0), &palette) else {
            panic!("expected rgb");
        };
        assert!(b > r);

        let Color::Rgb(r, _, b) = temperature_color(Some(35.0), &palette) else {
            panic!("expected rgb");
        };
        assert!(r > b);
    }

    #[test]
    fn test_missing_temperature_uses_dim_text() {
        let palette = Palette::light();
        assert_eq!(temperature_color(None, &palette), palette.text_dim);
        assert_eq!(temperature_color(Some(f64::NAN), &palette), palette.text_dim);
    }

    #[test]
    fn test_hsv_primaries() {
        assert_eq!(hsv_to_rgb(0.0, 1.0, 1.0), (255, 0, 0));
        assert_eq!(hsv_to_rgb(120.0, 1.0, 1.0), (0, 255, 0));
        assert_eq!(hsv_to_rgb(240.0, 1.0, 1.0), (0, 0, 255));
    }
}
