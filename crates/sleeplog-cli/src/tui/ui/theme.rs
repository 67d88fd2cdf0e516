//! Color palette and styling for the TUI.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::BorderType;

use sleeplog_core::Threshold;

/// Application theme with all UI colors.
#[derive(Debug, Clone, Copy)]
pub struct AppTheme {
    pub primary: Color,

    pub success: Color,
    pub warning: Color,
    pub danger: Color,
    pub info: Color,

    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_muted: Color,

    pub border_active: Color,
    pub border_inactive: Color,

    pub bg_header: Color,
}

impl Default for AppTheme {
    fn default() -> Self {
        Self::dark()
    }
}

impl AppTheme {
    /// Dark theme using Tailwind-inspired colors.
    #[must_use]
    pub const fn dark() -> Self {
        Self {
            primary: Color::Rgb(129, 140, 248), // indigo-400

            success: Color::Rgb(74, 222, 128), // green-400
            warning: Color::Rgb(251, 191, 36), // amber-400
            danger: Color::Rgb(248, 113, 113), // red-400
            info: Color::Rgb(96, 165, 250),    // blue-400

            text_primary: Color::Rgb(248, 250, 252), // slate-50
            text_secondary: Color::Rgb(148, 163, 184), // slate-400
            text_muted: Color::Rgb(100, 116, 139),   // slate-500

            border_active: Color::Rgb(129, 140, 248), // indigo-400
            border_inactive: Color::Rgb(71, 85, 105), // slate-600

            bg_header: Color::Rgb(30, 41, 59), // slate-800
        }
    }

    /// Color for a sleep duration against the threshold.
    ///
    /// Green at or above the threshold, amber just below it, red otherwise.
    #[must_use]
    pub fn hours_color(&self, hours: f64, threshold: Threshold) -> Color {
        if !threshold.is_below(hours) {
            self.success
        } else if threshold.is_near(hours) {
            self.warning
        } else {
            self.danger
        }
    }

    /// Style for active/focused borders.
    #[inline]
    #[must_use]
    pub fn border_active_style(&self) -> Style {
        Style::default().fg(self.border_active)
    }

    /// Style for inactive borders.
    #[inline]
    #[must_use]
    pub fn border_inactive_style(&self) -> Style {
        Style::default().fg(self.border_inactive)
    }

    /// Style for titles.
    #[inline]
    #[must_use]
    pub fn title_style(&self) -> Style {
        Style::default()
            .fg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for header/app bar.
    #[inline]
    #[must_use]
    pub fn header_style(&self) -> Style {
        Style::default().bg(self.bg_header)
    }
}

/// Default border type for all blocks.
pub const BORDER_TYPE: BorderType = BorderType::Rounded;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hours_color() {
        let theme = AppTheme::dark();
        let threshold = Threshold::default();
        assert_eq!(theme.hours_color(5.0, threshold), theme.danger);
        assert_eq!(theme.hours_color(6.5, threshold), theme.warning);
        assert_eq!(theme.hours_color(7.0, threshold), theme.success);
    }
}
