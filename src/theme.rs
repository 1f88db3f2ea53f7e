//! Day/night theme handling. A theme maps onto two colour tokens stored on
//! the root style scope; the terminal renderer reads them back as RGB.

use std::collections::BTreeMap;
use std::env;
use std::fmt;

use ratatui::style::Color;

/// Root-scope property holding the foreground ("dark") colour.
pub const COLOR_DARK: &str = "--color-dark";
/// Root-scope property holding the background ("light") colour.
pub const COLOR_LIGHT: &str = "--color-light";

const LIGHT_RGB: &str = "255,255,255";
const DARK_RGB: &str = "10,10,20";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Day,
    Night,
}

impl Theme {
    /// Interpret a submitted form value. Anything other than `night` is day.
    pub fn from_value(value: &str) -> Self {
        if value == "night" {
            Theme::Night
        } else {
            Theme::Day
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Day => "day",
            Theme::Night => "night",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Day => Theme::Night,
            Theme::Night => Theme::Day,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Custom properties set on the root scope of the view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RootStyle {
    properties: BTreeMap<String, String>,
}

impl RootStyle {
    pub fn set_property(&mut self, name: &str, value: &str) {
        self.properties.insert(name.to_string(), value.to_string());
    }

    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    /// Read a property written as `r,g,b` as a terminal colour.
    pub fn rgb(&self, name: &str) -> Option<Color> {
        parse_rgb(self.property(name)?)
    }
}

/// Write the two colour tokens for `theme` onto `root`.
pub fn apply_theme(root: &mut RootStyle, theme: Theme) {
    let (dark, light) = match theme {
        Theme::Night => (LIGHT_RGB, DARK_RGB),
        Theme::Day => (DARK_RGB, LIGHT_RGB),
    };
    root.set_property(COLOR_DARK, dark);
    root.set_property(COLOR_LIGHT, light);
    tracing::debug!(theme = %theme, "applied theme");
}

/// Theme matching the terminal's dark-mode preference, read once at startup.
pub fn detect_system_theme() -> Theme {
    theme_from_colorfgbg(env::var("COLORFGBG").ok().as_deref())
}

/// `COLORFGBG` is `fg;bg` (sometimes `fg;default;bg`). Background indices 0-6
/// and 8 are the dark half of the 16-colour palette.
fn theme_from_colorfgbg(value: Option<&str>) -> Theme {
    let background = value
        .and_then(|v| v.rsplit(';').next())
        .and_then(|bg| bg.trim().parse::<u8>().ok());
    match background {
        Some(0..=6 | 8) => Theme::Night,
        _ => Theme::Day,
    }
}

fn parse_rgb(value: &str) -> Option<Color> {
    let mut parts = value.split(',').map(|part| part.trim().parse::<u8>());
    let r = parts.next()?.ok()?;
    let g = parts.next()?.ok()?;
    let b = parts.next()?.ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(Color::Rgb(r, g, b))
}
