//! Colour palettes for the TUI
//!
//! The palette follows the profile's theme preference. `Auto` looks at the
//! `COLORFGBG` variable many terminals export and falls back to dark.

use ratatui::style::Color;

use crate::models::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Regular foreground text
    pub text: Color,
    /// Borders, hints and secondary text
    pub muted: Color,
    /// Titles, the active view and the selected month
    pub accent: Color,
    /// Key labels and table headers
    pub key: Color,
    pub income: Color,
    pub expense: Color,
    /// Budgets nearing their ceiling, status messages
    pub warning: Color,
    /// Trend sparkline
    pub chart: Color,
    /// Background of the selected table row
    pub selection: Color,
}

impl Palette {
    pub const DARK: Palette = Palette {
        text: Color::White,
        muted: Color::DarkGray,
        accent: Color::Cyan,
        key: Color::Yellow,
        income: Color::Green,
        expense: Color::Red,
        warning: Color::Yellow,
        chart: Color::Magenta,
        selection: Color::DarkGray,
    };

    pub const LIGHT: Palette = Palette {
        text: Color::Black,
        muted: Color::Gray,
        accent: Color::Blue,
        key: Color::Magenta,
        income: Color::Green,
        expense: Color::Red,
        warning: Color::LightRed,
        chart: Color::Blue,
        selection: Color::Gray,
    };

    /// Palette for a theme preference, resolving `Auto` from the environment
    pub fn for_theme(theme: Theme) -> Self {
        Self::resolve(theme, std::env::var("COLORFGBG").ok().as_deref())
    }

    fn resolve(theme: Theme, colorfgbg: Option<&str>) -> Self {
        match theme {
            Theme::Light => Self::LIGHT,
            Theme::Dark => Self::DARK,
            Theme::Auto if colorfgbg.is_some_and(has_light_background) => Self::LIGHT,
            Theme::Auto => Self::DARK,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::DARK
    }
}

/// `COLORFGBG` is "fg;bg" (sometimes "fg;default;bg"); ANSI 7 and 15 are
/// the light backgrounds
fn has_light_background(value: &str) -> bool {
    value
        .rsplit(';')
        .next()
        .and_then(|bg| bg.trim().parse::<u8>().ok())
        .is_some_and(|bg| bg == 7 || bg == 15)
}
