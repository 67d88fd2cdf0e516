//! End command implementation.

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Serialize;

use sleeplog_core::{SleepRecord, Threshold};
use sleeplog_types::format::format_hours;

use crate::format::{FormatOptions, format_slept};
use crate::logbook::{Ended, Logbook};
use crate::style;
use crate::util::{resolve_instant, write_output};

/// Shown when ending a session that was never started.
pub const NO_SESSION_MESSAGE: &str = "Start sleep first!";

pub fn cmd_end(
    log_path: &Path,
    at: Option<&str>,
    threshold: Threshold,
    json: bool,
    output: Option<&PathBuf>,
    opts: &FormatOptions,
) -> Result<()> {
    let now = resolve_instant(at)?;
    let mut logbook = Logbook::open(log_path)?;
    let ended = logbook.end(now)?;

    let content = if json {
        format_end_json(&ended, threshold, opts)?
    } else {
        format_end_text(&ended, threshold, opts)
    };
    write_output(output, &content)
}

fn format_end_text(ended: &Ended, threshold: Threshold, opts: &FormatOptions) -> String {
    match ended {
        Ended::NoActiveSession => {
            format!("{}\n", style::format_warning(NO_SESSION_MESSAGE, opts.no_color))
        }
        Ended::Recorded(record) => {
            let mut output = format_slept(record, threshold, opts);
            output.push('\n');
            if threshold.is_below(record.hours) {
                output.push_str(&style::format_warning(
                    &format!(
                        "Less than {} hours! {}",
                        format_hours(threshold.hours()),
                        threshold.evaluate(record.hours).action()
                    ),
                    opts.no_color,
                ));
                output.push('\n');
            }
            output
        }
    }
}

fn format_end_json(ended: &Ended, threshold: Threshold, opts: &FormatOptions) -> Result<String> {
    #[derive(Serialize)]
    struct EndJson<'a> {
        recorded: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        record: Option<&'a SleepRecord>,
        #[serde(skip_serializing_if = "Option::is_none")]
        below_threshold: Option<bool>,
        #[serde(skip_serializing_if = "Option::is_none")]
        message: Option<&'static str>,
    }

    let json = match ended {
        Ended::NoActiveSession => EndJson {
            recorded: false,
            record: None,
            below_threshold: None,
            message: Some(NO_SESSION_MESSAGE),
        },
        Ended::Recorded(record) => EndJson {
            recorded: true,
            record: Some(record),
            below_threshold: Some(threshold.is_below(record.hours)),
            message: None,
        },
    };
    opts.as_json(&json)
}
