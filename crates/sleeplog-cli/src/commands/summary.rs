//! Summary command implementation.

use std::path::{Path, PathBuf};

use anyhow::Result;

use sleeplog_core::Threshold;

use crate::cli::OutputFormat;
use crate::format::{
    FormatOptions, format_summary_csv, format_summary_json, format_summary_text,
};
use crate::logbook::Logbook;
use crate::util::write_output;

/// Arguments for the summary command.
pub struct SummaryArgs<'a> {
    pub log_path: &'a Path,
    pub window: usize,
    pub threshold: Threshold,
    pub show_chart: bool,
    pub format: OutputFormat,
    pub output: Option<&'a PathBuf>,
    pub opts: &'a FormatOptions,
}

pub fn cmd_summary(args: SummaryArgs<'_>) -> Result<()> {
    let SummaryArgs {
        log_path,
        window,
        threshold,
        show_chart,
        format,
        output,
        opts,
    } = args;

    let logbook = Logbook::open(log_path)?;
    let summary = logbook.summary(window, threshold)?;
    tracing::debug!(
        "Summarized {} of {} records (window {})",
        summary.recent_records.len(),
        summary.total_records,
        window
    );

    let content = match format {
        OutputFormat::Json => format_summary_json(&summary, opts)?,
        OutputFormat::Csv => format_summary_csv(&summary, opts),
        OutputFormat::Text => format_summary_text(&summary, show_chart, opts),
    };
    write_output(output, &content)
}
