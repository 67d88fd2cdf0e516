//! Aggregation over the record history.
//!
//! All functions here are pure: they take the full ordered record sequence
//! (as loaded from the store) and never touch storage or the clock.
//!
//! # Example
//!
//! ```
//! use sleeplog_core::{Threshold, stats};
//! use sleeplog_types::SleepRecord;
//! use time::macros::{date, time};
//!
//! let records = vec![
//!     SleepRecord::new(date!(2024 - 01 - 01), time!(23:00), time!(5:00), 6.0),
//!     SleepRecord::new(date!(2024 - 01 - 02), time!(23:00), time!(7:00), 8.0),
//! ];
//!
//! assert_eq!(stats::mean_hours(&records)?, 7.0);
//! assert_eq!(stats::recent(&records, 1), &records[1..]);
//!
//! let summary = stats::summarize(&records, 7, Threshold::default());
//! assert_eq!(summary.average_hours, Some(7.0));
//! assert!(!summary.warning);
//! # Ok::<(), sleeplog_core::Error>(())
//! ```

use serde::Serialize;

use sleeplog_types::SleepRecord;

use crate::error::{Error, Result};
use crate::thresholds::Threshold;

/// Shown wherever there is nothing to summarize yet.
pub const NO_DATA_MESSAGE: &str = "No data yet. Start tracking your sleep!";

/// The last `n` records, in their original order.
///
/// Returns every record when fewer than `n` exist.
pub fn recent(records: &[SleepRecord], n: usize) -> &[SleepRecord] {
    &records[records.len().saturating_sub(n)..]
}

/// Arithmetic mean of `hours` across all records.
///
/// # Errors
///
/// [`Error::EmptyInput`] when `records` is empty.
pub fn mean_hours(records: &[SleepRecord]) -> Result<f64> {
    if records.is_empty() {
        return Err(Error::EmptyInput);
    }
    let total: f64 = records.iter().map(|r| r.hours).sum();
    Ok(total / records.len() as f64)
}

/// Returns `true` when `hours` is strictly less than `threshold`.
pub fn below_threshold(hours: f64, threshold: f64) -> bool {
    hours < threshold
}

/// Everything a presentation layer needs to render the history view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// The most recent records, oldest first.
    pub recent_records: Vec<SleepRecord>,
    /// Mean over all records; `None` when there are none.
    pub average_hours: Option<f64>,
    /// Number of records in the whole history.
    pub total_records: usize,
    /// Most recently completed session.
    pub latest: Option<SleepRecord>,
    /// Threshold the warning was evaluated against.
    pub threshold_hours: f64,
    /// Records in the recent window that fall below the threshold.
    pub below_count: usize,
    /// The latest session fell below the threshold.
    pub warning: bool,
}

impl Summary {
    /// Returns `true` when there is no history yet.
    pub fn is_empty(&self) -> bool {
        self.total_records == 0
    }
}

/// Build a [`Summary`] over `records` with a recent window of `window`.
pub fn summarize(records: &[SleepRecord], window: usize, threshold: Threshold) -> Summary {
    let recent_records = recent(records, window).to_vec();
    let latest = records.last().copied();
    let below_count = recent_records
        .iter()
        .filter(|r| threshold.is_below(r.hours))
        .count();

    Summary {
        average_hours: mean_hours(records).ok(),
        total_records: records.len(),
        warning: latest.is_some_and(|r| threshold.is_below(r.hours)),
        threshold_hours: threshold.hours(),
        below_count,
        latest,
        recent_records,
    }
}
