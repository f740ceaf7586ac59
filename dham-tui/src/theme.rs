//! Light and dark palettes.

use crate::notifications::NotificationLevel;
use ratatui::style::Color;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub bg: Color,
    pub bg_secondary: Color,
    pub bg_highlight: Color,
    /// Saffron accent used for titles and the active tab.
    pub primary: Color,
    pub primary_dim: Color,
    pub secondary: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,
    pub text: Color,
    pub text_dim: Color,
    pub border: Color,
    pub border_focus: Color,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            bg: Color::Rgb(255, 251, 245),
            bg_secondary: Color::Rgb(255, 243, 224),
            bg_highlight: Color::Rgb(255, 224, 178),
            primary: Color::Rgb(230, 81, 0),
            primary_dim: Color::Rgb(191, 120, 60),
            secondary: Color::Rgb(121, 85, 72),
            success: Color::Rgb(46, 125, 50),
            warning: Color::Rgb(237, 108, 2),
            error: Color::Rgb(198, 40, 40),
            info: Color::Rgb(2, 119, 189),
            text: Color::Rgb(33, 33, 33),
            text_dim: Color::Rgb(117, 117, 117),
            border: Color::Rgb(215, 204, 200),
            border_focus: Color::Rgb(230, 81, 0),
        }
    }

    pub fn dark() -> Self {
        Self {
            bg: Color::Rgb(18, 18, 18),
            bg_secondary: Color::Rgb(30, 30, 30),
            bg_highlight: Color::Rgb(62, 39, 35),
            primary: Color::Rgb(255, 167, 38),
            primary_dim: Color::Rgb(176, 110, 30),
            secondary: Color::Rgb(188, 170, 164),
            success: Color::Rgb(102, 187, 106),
            warning: Color::Rgb(255, 202, 40),
            error: Color::Rgb(239, 83, 80),
            info: Color::Rgb(79, 195, 247),
            text: Color::Rgb(238, 238, 238),
            text_dim: Color::Rgb(158, 158, 158),
            border: Color::Rgb(66, 66, 66),
            border_focus: Color::Rgb(255, 167, 38),
        }
    }

    pub fn for_dark_mode(dark_mode: bool) -> Self {
        if dark_mode {
            Self::dark()
        } else {
            Self::light()
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

pub fn notification_color(level: NotificationLevel, theme: &Theme) -> Color {
    match level {
        NotificationLevel::Info => theme.info,
        NotificationLevel::Warning => theme.warning,
        NotificationLevel::Error => theme.error,
        NotificationLevel::Success => theme.success,
    }
}

/// Upcoming events stand out; past ones are dimmed.
pub fn event_date_color(date: &str, today: &str, theme: &Theme) -> Color {
    if date >= today {
        theme.primary
    } else {
        theme.text_dim
    }
}
