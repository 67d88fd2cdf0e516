//! Output formatting utilities for text, JSON, and CSV output.

use anyhow::Result;
use serde::Serialize;
use time::PrimitiveDateTime;

use sleeplog_core::{NO_DATA_MESSAGE, SessionStatus, SleepRecord, Summary, Threshold};
use sleeplog_types::COLUMNS;
use sleeplog_types::format::{format_clock, format_hours, format_timestamp};

use crate::chart::{ChartOptions, render_chart};
use crate::cli::StyleMode;
use crate::style;

/// Formatting options for output.
#[derive(Debug, Clone, Copy)]
pub struct FormatOptions {
    /// Disable colored output.
    pub no_color: bool,
    /// Omit header row in CSV output.
    pub no_header: bool,
    /// Use compact JSON output (no pretty-printing).
    pub compact: bool,
    /// Visual styling mode.
    pub style: StyleMode,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            no_color: false,
            no_header: false,
            compact: false,
            style: StyleMode::Rich,
        }
    }
}

impl FormatOptions {
    pub fn new(no_color: bool, style: StyleMode) -> Self {
        // Plain mode automatically disables colors for pipe-friendliness
        let effective_no_color = no_color || style == StyleMode::Plain;
        Self {
            no_color: effective_no_color,
            no_header: false,
            compact: false,
            style,
        }
    }

    /// Check if rich styling is enabled.
    pub fn is_rich(&self) -> bool {
        self.style == StyleMode::Rich
    }

    /// Check if plain styling is enabled (no decorations).
    pub fn is_plain(&self) -> bool {
        self.style == StyleMode::Plain
    }

    /// Create with no_header option for CSV output.
    pub fn with_no_header(mut self, no_header: bool) -> Self {
        self.no_header = no_header;
        self
    }

    /// Create with compact JSON option.
    pub fn with_compact(mut self, compact: bool) -> Self {
        self.compact = compact;
        self
    }

    /// Serialize value to JSON string, respecting compact option.
    pub fn as_json<T: Serialize>(&self, value: &T) -> Result<String> {
        let json = if self.compact {
            serde_json::to_string(value)?
        } else {
            serde_json::to_string_pretty(value)?
        };
        Ok(json + "\n")
    }
}

// ============================================================================
// Record formatting
// ============================================================================

fn records_table(records: &[SleepRecord], threshold: Threshold, opts: &FormatOptions) -> String {
    use tabled::builder::Builder;

    let mut builder = Builder::default();
    builder.push_record(["Date", "Start", "End", "Hours"]);
    for record in records {
        builder.push_record([
            record.date_string(),
            record.start_string(),
            record.end_string(),
            style::format_hours_colored(record.hours, threshold, opts.no_color),
        ]);
    }

    let mut table = builder.build();
    style::apply_table_style(&mut table, opts.style);
    let mut output = table.to_string();
    output.push('\n');
    output
}

#[must_use]
pub fn format_records_text(
    records: &[SleepRecord],
    threshold: Threshold,
    opts: &FormatOptions,
) -> String {
    if records.is_empty() {
        return format!("{}\n", style::format_info(NO_DATA_MESSAGE, opts.no_color));
    }

    let mut output = format!("Sleep records ({}):\n\n", records.len());
    output.push_str(&records_table(records, threshold, opts));
    output
}

#[must_use]
pub fn format_records_csv(records: &[SleepRecord], opts: &FormatOptions) -> String {
    let mut output = if opts.no_header {
        String::new()
    } else {
        format!("{}\n", COLUMNS.join(","))
    };
    for record in records {
        output.push_str(&format!(
            "{},{},{},{}\n",
            record.date_string(),
            record.start_string(),
            record.end_string(),
            format_hours(record.hours)
        ));
    }
    output
}

pub fn format_records_json(records: &[SleepRecord], opts: &FormatOptions) -> Result<String> {
    opts.as_json(&records)
}

// ============================================================================
// Summary formatting
// ============================================================================

#[must_use]
pub fn format_summary_text(summary: &Summary, show_chart: bool, opts: &FormatOptions) -> String {
    if summary.is_empty() {
        return format!("{}\n", style::format_info(NO_DATA_MESSAGE, opts.no_color));
    }

    let threshold = Threshold::new(summary.threshold_hours).unwrap_or_default();
    let mut output = style::format_title("Sleep Summary", opts.style, opts.no_color);
    output.push_str("\n\n");

    output.push_str(&format!(
        "Last {} of {} records:\n",
        summary.recent_records.len(),
        summary.total_records
    ));
    output.push_str(&records_table(&summary.recent_records, threshold, opts));
    output.push('\n');

    if let Some(average) = summary.average_hours {
        output.push_str(&format!(
            "Average sleep: {} hours\n",
            style::format_hours_colored(average, threshold, opts.no_color)
        ));
    }
    if summary.below_count > 0 {
        output.push_str(&format!(
            "Nights below {:.1} h in this window: {}\n",
            threshold.hours(),
            summary.below_count
        ));
    }

    if summary.warning {
        let level = threshold.evaluate(summary.latest.map_or(0.0, |r| r.hours));
        output.push_str(&style::format_warning(
            &format!(
                "Less than {} hours! {}",
                format_hours(threshold.hours()),
                level.action()
            ),
            opts.no_color,
        ));
        output.push('\n');
    } else if opts.is_rich() {
        output.push_str(&style::format_success(
            "Last night met your sleep goal",
            opts.no_color,
        ));
        output.push('\n');
    }

    if show_chart {
        // Keep the newest nights that fit the terminal.
        let fits = crate::chart::columns_for_width(style::terminal_width());
        let chart = render_chart(
            sleeplog_core::recent(&summary.recent_records, fits),
            &ChartOptions {
                threshold: threshold.hours(),
                ascii: opts.is_plain(),
                no_color: opts.no_color,
                ..Default::default()
            },
        );
        output.push('\n');
        output.push_str(&chart);
    }

    output
}

#[must_use]
pub fn format_summary_csv(summary: &Summary, opts: &FormatOptions) -> String {
    format_records_csv(&summary.recent_records, opts)
}

pub fn format_summary_json(summary: &Summary, opts: &FormatOptions) -> Result<String> {
    opts.as_json(summary)
}

// ============================================================================
// Session formatting
// ============================================================================

#[must_use]
pub fn format_status_text(
    status: &SessionStatus,
    now: PrimitiveDateTime,
    opts: &FormatOptions,
) -> String {
    match status {
        SessionStatus::Idle => format!(
            "{}\n",
            style::format_info("Awake - no sleep session in progress", opts.no_color)
        ),
        SessionStatus::Active { since } => {
            let elapsed = (now - *since).whole_minutes();
            format!(
                "{}\n",
                style::format_info(
                    &format!(
                        "Sleeping since {} ({} elapsed)",
                        format_timestamp(*since).replace('T', " "),
                        style::format_elapsed(elapsed)
                    ),
                    opts.no_color
                )
            )
        }
    }
}

pub fn format_status_json(
    status: &SessionStatus,
    now: PrimitiveDateTime,
    opts: &FormatOptions,
) -> Result<String> {
    #[derive(Serialize)]
    struct StatusJson<'a> {
        #[serde(flatten)]
        status: &'a SessionStatus,
        #[serde(skip_serializing_if = "Option::is_none")]
        elapsed_minutes: Option<i64>,
    }

    let elapsed_minutes = match status {
        SessionStatus::Active { since } => Some((now - *since).whole_minutes().max(0)),
        SessionStatus::Idle => None,
    };
    opts.as_json(&StatusJson {
        status,
        elapsed_minutes,
    })
}

/// Confirmation line for a completed session.
#[must_use]
pub fn format_slept(record: &SleepRecord, threshold: Threshold, opts: &FormatOptions) -> String {
    let message = format!(
        "You slept {} hours ({} - {})",
        style::format_hours_colored(record.hours, threshold, opts.no_color),
        format_clock(record.start),
        format_clock(record.end)
    );
    style::format_success(&message, opts.no_color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sleeplog_core::stats::summarize;
    use time::macros::{date, datetime, time};

    fn plain() -> FormatOptions {
        FormatOptions::new(true, StyleMode::Plain)
    }

    fn records() -> Vec<SleepRecord> {
        vec![
            SleepRecord::new(date!(2024 - 01 - 01), time!(10:00), time!(15:00), 5.0),
            SleepRecord::new(date!(2024 - 01 - 02), time!(23:00), time!(6:30), 7.5),
        ]
    }

    #[test]
    fn test_plain_disables_color() {
        let opts = FormatOptions::new(false, StyleMode::Plain);
        assert!(opts.no_color);
        assert!(opts.is_plain());
        assert!(!FormatOptions::new(false, StyleMode::Rich).no_color);
    }

    #[test]
    fn test_as_json_compact() {
        let opts = FormatOptions::default().with_compact(true);
        assert_eq!(opts.as_json(&vec![1, 2]).unwrap(), "[1,2]\n");
    }

    #[test]
    fn test_format_records_csv() {
        let csv = format_records_csv(&records(), &plain());
        assert_eq!(
            csv,
            "date,start,end,hours\n\
             2024-01-01,10:00:00,15:00:00,5.0\n\
             2024-01-02,23:00:00,06:30:00,7.5\n"
        );
    }

    #[test]
    fn test_format_records_csv_no_header() {
        let csv = format_records_csv(&records(), &plain().with_no_header(true));
        assert!(csv.starts_with("2024-01-01"));
        assert_eq!(csv.lines().count(), 2);
    }

    #[test]
    fn test_format_records_json() {
        let json = format_records_json(&records(), &plain()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[1]["start"], "23:00:00");
        assert_eq!(value[1]["hours"], 7.5);
    }

    #[test]
    fn test_format_records_text() {
        let text = format_records_text(&records(), Threshold::default(), &plain());
        assert!(text.contains("Sleep records (2)"));
        assert!(text.contains("2024-01-02"));
        assert!(text.contains("7.50"));
    }

    #[test]
    fn test_format_empty_records_text() {
        let text = format_records_text(&[], Threshold::default(), &plain());
        assert!(text.contains(NO_DATA_MESSAGE));
    }

    #[test]
    fn test_format_summary_text_empty() {
        let summary = summarize(&[], 7, Threshold::default());
        let text = format_summary_text(&summary, true, &plain());
        assert_eq!(text, format!("[--] {}\n", NO_DATA_MESSAGE));
    }

    #[test]
    fn test_format_summary_text_no_warning() {
        let summary = summarize(&records(), 7, Threshold::default());
        let text = format_summary_text(&summary, false, &plain());
        assert!(text.contains("Sleep Summary"));
        assert!(text.contains("Average sleep: 6.25 hours"));
        assert!(text.contains("Nights below 7.0 h in this window: 1"));
        assert!(!text.contains("Less than"));
    }

    #[test]
    fn test_format_summary_text_warning_and_chart() {
        let mut history = records();
        history.reverse();
        let summary = summarize(&history, 7, Threshold::default());
        let text = format_summary_text(&summary, true, &plain());
        assert!(text.contains("[!!] Less than 7.0 hours!"));
        assert!(text.contains("01-02"));
        assert!(text.is_ascii());
    }

    #[test]
    fn test_format_summary_json() {
        let summary = summarize(&records(), 7, Threshold::default());
        let json = format_summary_json(&summary, &plain()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["average_hours"], 6.25);
        assert_eq!(value["warning"], false);
        assert_eq!(value["total_records"], 2);
    }

    #[test]
    fn test_format_status() {
        let now = datetime!(2024-01-02 1:15:00);
        let idle = format_status_text(&SessionStatus::Idle, now, &plain());
        assert!(idle.contains("Awake"));

        let active = SessionStatus::Active {
            since: datetime!(2024-01-01 23:00:00),
        };
        let text = format_status_text(&active, now, &plain());
        assert!(text.contains("Sleeping since 2024-01-01 23:00:00 (2h 15m elapsed)"));

        let json = format_status_json(&active, now, &plain()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["state"], "active");
        assert_eq!(value["since"], "2024-01-01T23:00:00");
        assert_eq!(value["elapsed_minutes"], 135);
    }

    #[test]
    fn test_format_slept() {
        let text = format_slept(&records()[1], Threshold::default(), &plain());
        assert_eq!(text, "[OK] You slept 7.50 hours (23:00:00 - 06:30:00)");
    }
}
