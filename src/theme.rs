//! Centralized theme and styling for the TUI
//!
//! Single source of truth for colors and styles used throughout the
//! application, keyed to the TBN brand palette of the original tracker.

#![allow(dead_code)]

use ratatui::style::{Color, Modifier, Style};

use crate::types::{Priority, Status};

/// Core color palette for the application
pub struct Colors;

impl Colors {
    /// Brand blue, used for titles and borders
    pub const PRIMARY: Color = Color::Rgb(0, 74, 173);

    /// Brand orange, used for progress fills and emphasis
    pub const ACCENT: Color = Color::Rgb(255, 122, 0);

    /// Default foreground text color
    pub const FG_PRIMARY: Color = Color::White;

    /// Secondary/muted text color
    pub const FG_SECONDARY: Color = Color::Gray;

    /// Disabled/inactive text color
    pub const FG_MUTED: Color = Color::DarkGray;

    /// Success/positive feedback
    pub const SUCCESS: Color = Color::Green;

    /// Warning/caution feedback
    pub const WARNING: Color = Color::Yellow;

    /// Error/danger feedback
    pub const ERROR: Color = Color::Red;

    /// Active border color
    pub const BORDER_ACTIVE: Color = Color::Cyan;

    /// Inactive/unfocused border color
    pub const BORDER_INACTIVE: Color = Color::DarkGray;

    /// Selected item highlight background
    pub const SELECTED_BG: Color = Color::Rgb(255, 122, 0);

    /// Selected item text (for contrast on orange bg)
    pub const SELECTED_FG: Color = Color::Black;

    /// Danger dialog background
    pub const BG_DANGER: Color = Color::Rgb(30, 20, 20);
}

/// Pre-built styles for common UI elements
pub struct Styles;

impl Styles {
    pub fn title() -> Style {
        Style::default()
            .fg(Colors::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn selected() -> Style {
        Style::default()
            .bg(Colors::SELECTED_BG)
            .fg(Colors::SELECTED_FG)
            .add_modifier(Modifier::BOLD)
    }

    pub fn label() -> Style {
        Style::default().fg(Colors::FG_SECONDARY)
    }

    pub fn value() -> Style {
        Style::default().fg(Colors::FG_PRIMARY)
    }

    pub fn muted() -> Style {
        Style::default().fg(Colors::FG_MUTED)
    }

    pub fn border(active: bool) -> Style {
        if active {
            Style::default().fg(Colors::BORDER_ACTIVE)
        } else {
            Style::default().fg(Colors::BORDER_INACTIVE)
        }
    }

    pub fn danger() -> Style {
        Style::default()
            .fg(Colors::ERROR)
            .add_modifier(Modifier::BOLD)
    }

    pub fn success() -> Style {
        Style::default().fg(Colors::SUCCESS)
    }
}

/// Semantic color for a row/header status.
pub fn status_color(status: Status) -> Color {
    match status {
        Status::NotStarted => Colors::FG_MUTED,
        Status::InProgress => Colors::WARNING,
        Status::Done => Colors::SUCCESS,
        Status::Late => Colors::ERROR,
    }
}

/// Semantic color for a row priority.
pub fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::High => Colors::ERROR,
        Priority::Medium => Colors::WARNING,
        Priority::Low => Colors::FG_SECONDARY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_colors_are_distinct_for_actionable_states() {
        assert_ne!(status_color(Status::Done), status_color(Status::Late));
        assert_ne!(status_color(Status::InProgress), status_color(Status::Late));
    }

    #[test]
    fn test_selected_style_has_contrast() {
        let style = Styles::selected();
        assert_eq!(style.bg, Some(Colors::SELECTED_BG));
        assert_eq!(style.fg, Some(Colors::SELECTED_FG));
    }
}
