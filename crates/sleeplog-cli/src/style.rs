//! Visual styling utilities for the CLI.
//!
//! This module provides consistent styling across all CLI output including:
//! - Status badges for success, info and warning messages
//! - Duration coloring against the sleep threshold
//! - Table formatting
//! - Title headers

use owo_colors::OwoColorize;

use sleeplog_core::Threshold;

use crate::cli::StyleMode;

// ============================================================================
// Colored Value Formatting
// ============================================================================

/// Format a duration in hours with a color based on the threshold.
///
/// Green at or above the threshold, yellow within an hour below it, red
/// otherwise.
pub fn format_hours_colored(hours: f64, threshold: Threshold, no_color: bool) -> String {
    let formatted = format!("{:.2}", hours);
    if no_color {
        return formatted;
    }

    if !threshold.is_below(hours) {
        format!("{}", formatted.green())
    } else if threshold.is_near(hours) {
        format!("{}", formatted.yellow())
    } else {
        format!("{}", formatted.red())
    }
}

/// Format an elapsed number of minutes as `Xh YYm`.
pub fn format_elapsed(minutes: i64) -> String {
    let minutes = minutes.max(0);
    format!("{}h {:02}m", minutes / 60, minutes % 60)
}

// ============================================================================
// Status Messages
// ============================================================================

/// Format a success message.
pub fn format_success(message: &str, no_color: bool) -> String {
    if no_color {
        format!("[OK] {}", message)
    } else {
        format!("{} {}", "[OK]".green(), message)
    }
}

/// Format an info message.
pub fn format_info(message: &str, no_color: bool) -> String {
    if no_color {
        format!("[--] {}", message)
    } else {
        format!("{} {}", "[--]".cyan(), message)
    }
}

/// Format a warning message.
pub fn format_warning(message: &str, no_color: bool) -> String {
    if no_color {
        format!("[!!] {}", message)
    } else {
        format!("{} {}", "[!!]".yellow(), message)
    }
}

// ============================================================================
// Section Headers
// ============================================================================

/// Format a title header.
pub fn format_title(title: &str, style: StyleMode, no_color: bool) -> String {
    let rule = if style == StyleMode::Plain { "=" } else { "━" };
    let underline = rule.repeat(title.chars().count());
    if no_color {
        format!("{}\n{}", title, underline)
    } else {
        format!("{}\n{}", title.bold(), underline.dimmed())
    }
}

/// Get terminal width, defaulting to 80 if detection fails.
pub fn terminal_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(80)
}

/// Apply table style based on StyleMode.
pub fn apply_table_style(table: &mut tabled::Table, style: StyleMode) {
    use tabled::settings::Style;
    match style {
        StyleMode::Rich => {
            table.with(Style::rounded());
        }
        StyleMode::Minimal => {
            table.with(Style::psql());
        }
        StyleMode::Plain => {
            table.with(Style::blank());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_hours_colored_no_color() {
        let threshold = Threshold::default();
        assert_eq!(format_hours_colored(7.5, threshold, true), "7.50");
        assert_eq!(format_hours_colored(5.0, threshold, true), "5.00");
    }

    #[test]
    fn test_format_hours_colored_with_color_contains_value() {
        let threshold = Threshold::default();
        assert!(format_hours_colored(8.0, threshold, false).contains("8.00"));
        assert!(format_hours_colored(6.5, threshold, false).contains("6.50"));
        assert!(format_hours_colored(4.0, threshold, false).contains("4.00"));
        assert_ne!(format_hours_colored(4.0, threshold, false), "4.00");
    }

    #[test]
    fn test_format_hours_colored_follows_threshold_bands() {
        let threshold = Threshold::default();
        assert_eq!(
            format_hours_colored(7.0, threshold, false),
            format!("{}", "7.00".green())
        );
        assert_eq!(
            format_hours_colored(6.0, threshold, false),
            format!("{}", "6.00".yellow())
        );
        assert_eq!(
            format_hours_colored(5.9, threshold, false),
            format!("{}", "5.90".red())
        );
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(0), "0h 00m");
        assert_eq!(format_elapsed(75), "1h 15m");
        assert_eq!(format_elapsed(-5), "0h 00m");
    }

    #[test]
    fn test_badges_no_color() {
        assert_eq!(format_success("done", true), "[OK] done");
        assert_eq!(format_info("note", true), "[--] note");
        assert_eq!(format_warning("careful", true), "[!!] careful");
    }

    #[test]
    fn test_format_title() {
        assert_eq!(
            format_title("Sleep", StyleMode::Plain, true),
            "Sleep\n====="
        );
        assert_eq!(format_title("Sleep", StyleMode::Rich, true), "Sleep\n━━━━━");
    }
}
