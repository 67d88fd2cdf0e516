//! History command implementation.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};

use sleeplog_core::Threshold;
use sleeplog_store::RecordQuery;

use crate::cli::OutputFormat;
use crate::format::{FormatOptions, format_records_csv, format_records_json, format_records_text};
use crate::logbook::Logbook;
use crate::util::{parse_date_arg, write_output};

/// Arguments for the history command.
pub struct HistoryArgs<'a> {
    pub log_path: &'a Path,
    pub count: usize,
    pub since: Option<String>,
    pub until: Option<String>,
    pub threshold: Threshold,
    pub format: OutputFormat,
    pub output: Option<&'a PathBuf>,
    pub opts: &'a FormatOptions,
}

/// Build the record filter from command-line arguments.
///
/// A `count` of zero means no limit.
pub fn build_query(count: usize, since: Option<&str>, until: Option<&str>) -> Result<RecordQuery> {
    // Parse date filters upfront to fail fast
    let since = parse_date_arg(since)?;
    let until = parse_date_arg(until)?;
    if let (Some(since), Some(until)) = (since, until)
        && since > until
    {
        bail!("--since ({}) is after --until ({})", since, until);
    }

    let mut query = RecordQuery::new();
    if let Some(date) = since {
        query = query.since(date);
    }
    if let Some(date) = until {
        query = query.until(date);
    }
    if count > 0 {
        query = query.limit(count);
    }
    Ok(query)
}

pub fn cmd_history(args: HistoryArgs<'_>) -> Result<()> {
    let HistoryArgs {
        log_path,
        count,
        since,
        until,
        threshold,
        format,
        output,
        opts,
    } = args;

    let query = build_query(count, since.as_deref(), until.as_deref())?;
    let logbook = Logbook::open(log_path)?;
    let records = logbook.query(&query)?;
    tracing::debug!("History query matched {} records", records.len());

    let content = match format {
        OutputFormat::Json => format_records_json(&records, opts)?,
        OutputFormat::Csv => format_records_csv(&records, opts),
        OutputFormat::Text => format_records_text(&records, threshold, opts),
    };
    write_output(output, &content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sleeplog_core::SleepRecord;
    use time::macros::{date, time};

    fn nights() -> Vec<SleepRecord> {
        (1..=5)
            .map(|day| {
                SleepRecord::new(
                    time::Date::from_calendar_date(2024, time::Month::January, day).unwrap(),
                    time!(23:00),
                    time!(7:00),
                    8.0,
                )
            })
            .collect()
    }

    #[test]
    fn test_build_query_unbounded() {
        let query = build_query(0, None, None).unwrap();
        assert_eq!(query.apply(nights()).len(), 5);
    }

    #[test]
    fn test_build_query_count_keeps_newest() {
        let query = build_query(2, None, None).unwrap();
        let kept = query.apply(nights());
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].date, date!(2024 - 01 - 04));
    }

    #[test]
    fn test_build_query_date_range() {
        let query = build_query(0, Some("2024-01-02"), Some("2024-01-03")).unwrap();
        let kept = query.apply(nights());
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[1].date, date!(2024 - 01 - 03));
    }

    #[test]
    fn test_build_query_rejects_inverted_range() {
        assert!(build_query(0, Some("2024-01-05"), Some("2024-01-01")).is_err());
        assert!(build_query(0, Some("January"), None).is_err());
    }

    #[test]
    fn test_cmd_history_writes_csv() {
        let dir = tempfile::TempDir::new().unwrap();
        let log = dir.path().join("sleep_log.csv");
        std::fs::write(
            &log,
            "date,start,end,hours\n2024-01-01,23:00:00,07:00:00,8.0\n",
        )
        .unwrap();
        let out = dir.path().join("export.csv");
        let opts = FormatOptions::default().with_no_header(true);

        cmd_history(HistoryArgs {
            log_path: &log,
            count: 0,
            since: None,
            until: None,
            threshold: Threshold::default(),
            format: OutputFormat::Csv,
            output: Some(&out),
            opts: &opts,
        })
        .unwrap();

        assert_eq!(
            std::fs::read_to_string(&out).unwrap(),
            "2024-01-01,23:00:00,07:00:00,8.0\n"
        );
    }
}
