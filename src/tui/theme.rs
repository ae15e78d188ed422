//! TUI Theme configuration
//!
//! Light and dark palettes mirroring the page's two colour schemes, each
//! degraded to whatever colour depth the terminal supports.

use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};

/// Page colour scheme, toggled with `t` and persisted in the preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeMode {
    Light,
    #[default]
    Dark,
}

impl ThemeMode {
    pub fn toggle(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Text of the theme indicator
    pub fn label(self) -> &'static str {
        match self {
            Self::Light => "☼ LIGHT",
            Self::Dark => "☾ DARK",
        }
    }

    /// Stored choice first, then the terminal background, then dark
    pub fn preferred(stored: Option<ThemeMode>) -> Self {
        stored
            .or_else(|| {
                std::env::var("COLORFGBG")
                    .ok()
                    .and_then(|value| Self::from_colorfgbg(&value))
            })
            .unwrap_or_default()
    }

    /// Parse `COLORFGBG` ("fg;bg" or "fg;default;bg"). The last field is
    /// the background's ANSI index: 0-6 and 8 are dark, 7 and 9-15 light.
    pub fn from_colorfgbg(value: &str) -> Option<Self> {
        let bg: u8 = value.rsplit(';').next()?.trim().parse().ok()?;
        match bg {
            0..=6 | 8 => Some(Self::Dark),
            7 | 9..=15 => Some(Self::Light),
            _ => None,
        }
    }
}

/// Terminal color capability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Basic 16 ANSI colors (maximum compatibility)
    Basic,
    /// 256 color palette
    #[default]
    Indexed,
    /// True color (24-bit RGB)
    TrueColor,
}

impl ColorMode {
    /// Detect the best color mode for the current terminal
    pub fn detect() -> Self {
        if let Ok(colorterm) = std::env::var("COLORTERM") {
            if colorterm == "truecolor" || colorterm == "24bit" {
                return Self::TrueColor;
            }
        }

        if let Ok(term) = std::env::var("TERM") {
            if term.contains("kitty") || term.contains("alacritty") {
                return Self::TrueColor;
            }
            if term.contains("256color") {
                return Self::Indexed;
            }
        }

        Self::Basic
    }

    /// Pick the variant of a colour this mode can show
    fn pick(self, rgb: (u8, u8, u8), indexed: u8, basic: Color) -> Color {
        match self {
            Self::TrueColor => Color::Rgb(rgb.0, rgb.1, rgb.2),
            Self::Indexed => Color::Indexed(indexed),
            Self::Basic => basic,
        }
    }
}

/// Palette for the page and the terminal overlay
#[derive(Debug, Clone)]
pub struct Theme {
    pub mode: ThemeMode,

    // Page
    pub background: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub accent: Color,
    pub border: Color,

    // profile.json body
    pub json_key: Color,
    pub json_string: Color,
    pub json_comment: Color,

    // Traffic lights
    pub light_red: Color,
    pub light_yellow: Color,
    pub light_green: Color,

    // Terminal overlay
    pub overlay_bg: Color,
    pub overlay_fg: Color,
    pub overlay_prompt: Color,
    pub cmd_result: Color,
    pub cmd_error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(ThemeMode::default(), ColorMode::detect())
    }
}

impl Theme {
    pub fn new(mode: ThemeMode, color: ColorMode) -> Self {
        match mode {
            ThemeMode::Light => Self::light(color),
            ThemeMode::Dark => Self::dark(color),
        }
    }

    pub fn dark(c: ColorMode) -> Self {
        Self {
            mode: ThemeMode::Dark,
            background: c.pick((24, 24, 27), 234, Color::Black),
            text_primary: c.pick((228, 228, 231), 254, Color::White),
            text_secondary: c.pick((161, 161, 170), 248, Color::Gray),
            accent: c.pick((137, 180, 250), 117, Color::Cyan),
            border: c.pick((82, 82, 91), 240, Color::DarkGray),

            json_key: c.pick((180, 190, 254), 147, Color::LightBlue),
            json_string: c.pick((166, 227, 161), 156, Color::LightGreen),
            json_comment: c.pick((113, 113, 122), 243, Color::DarkGray),

            light_red: c.pick((255, 95, 86), 203, Color::LightRed),
            light_yellow: c.pick((255, 189, 46), 214, Color::LightYellow),
            light_green: c.pick((39, 201, 63), 41, Color::LightGreen),

            overlay_bg: c.pick((0, 0, 0), 16, Color::Black),
            overlay_fg: c.pick((0, 255, 65), 46, Color::Green),
            overlay_prompt: c.pick((0, 255, 65), 46, Color::LightGreen),
            cmd_result: c.pick((137, 220, 235), 116, Color::Cyan),
            cmd_error: c.pick((255, 85, 85), 203, Color::Red),
        }
    }

    pub fn light(c: ColorMode) -> Self {
        Self {
            mode: ThemeMode::Light,
            background: c.pick((250, 250, 249), 255, Color::White),
            text_primary: c.pick((28, 25, 23), 235, Color::Black),
            text_secondary: c.pick((87, 83, 78), 241, Color::DarkGray),
            accent: c.pick((30, 102, 245), 27, Color::Blue),
            border: c.pick((214, 211, 209), 252, Color::Gray),

            json_key: c.pick((136, 57, 239), 92, Color::Magenta),
            json_string: c.pick((64, 160, 43), 70, Color::Green),
            json_comment: c.pick((140, 143, 161), 245, Color::DarkGray),

            light_red: c.pick((255, 95, 86), 203, Color::Red),
            light_yellow: c.pick((255, 189, 46), 214, Color::Yellow),
            light_green: c.pick((39, 201, 63), 41, Color::Green),

            // The overlay stays a black CRT in both schemes
            overlay_bg: c.pick((0, 0, 0), 16, Color::Black),
            overlay_fg: c.pick((0, 255, 65), 46, Color::Green),
            overlay_prompt: c.pick((0, 255, 65), 46, Color::LightGreen),
            cmd_result: c.pick((137, 220, 235), 116, Color::Cyan),
            cmd_error: c.pick((255, 85, 85), 203, Color::Red),
        }
    }

    pub fn page(&self) -> Style {
        Style::default().bg(self.background).fg(self.text_primary)
    }

    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.text_primary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn secondary(&self) -> Style {
        Style::default().fg(self.text_secondary)
    }

    pub fn border(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn overlay(&self) -> Style {
        Style::default().bg(self.overlay_bg).fg(self.overlay_fg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_toggle_and_labels() {
        assert_eq!(ThemeMode::Dark.toggle(), ThemeMode::Light);
        assert_eq!(ThemeMode::Light.toggle(), ThemeMode::Dark);
        assert_eq!(ThemeMode::Light.label(), "☼ LIGHT");
        assert_eq!(ThemeMode::Dark.label(), "☾ DARK");
    }

    #[test]
    fn test_colorfgbg_parsing() {
        assert_eq!(ThemeMode::from_colorfgbg("15;0"), Some(ThemeMode::Dark));
        assert_eq!(ThemeMode::from_colorfgbg("0;15"), Some(ThemeMode::Light));
        assert_eq!(ThemeMode::from_colorfgbg("0;default;7"), Some(ThemeMode::Light));
        assert_eq!(ThemeMode::from_colorfgbg("garbage"), None);
        assert_eq!(ThemeMode::from_colorfgbg("0;200"), None);
    }

    #[test]
    fn test_stored_preference_wins() {
        assert_eq!(ThemeMode::preferred(Some(ThemeMode::Light)), ThemeMode::Light);
    }

    #[test]
    fn test_theme_mode_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&ThemeMode::Light).unwrap(), "\"light\"");
    }

    #[test]
    fn test_color_depths() {
        assert_eq!(Theme::dark(ColorMode::Basic).accent, Color::Cyan);
        assert_eq!(Theme::dark(ColorMode::Indexed).accent, Color::Indexed(117));
        assert_eq!(
            Theme::dark(ColorMode::TrueColor).accent,
            Color::Rgb(137, 180, 250)
        );
        assert_eq!(Theme::new(ThemeMode::Light, ColorMode::Basic).mode, ThemeMode::Light);
    }

    #[test]
    fn test_overlay_style() {
        let style = Theme::light(ColorMode::Basic).overlay();
        assert_eq!(style.bg, Some(Color::Black));
        assert_eq!(style.fg, Some(Color::Green));
    }
}
