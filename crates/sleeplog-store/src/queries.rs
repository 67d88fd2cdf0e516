//! Query builder for stored sleep records.
//!
//! [`RecordQuery`] filters the loaded history by date and trims it to the
//! most recent records. It follows the builder pattern:
//!
//! ```
//! use sleeplog_store::RecordQuery;
//! use time::macros::date;
//!
//! let query = RecordQuery::new()
//!     .since(date!(2024 - 01 - 01))
//!     .until(date!(2024 - 01 - 31))
//!     .limit(7);
//! assert_eq!(query.limit, Some(7));
//! ```

use time::Date;

use sleeplog_types::SleepRecord;

/// Fluent query builder for sleep records.
///
/// Dates filter on the record's `date` (the day of waking), inclusive on
/// both ends. Results keep file order (oldest first); `limit` keeps the
/// newest records.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RecordQuery {
    /// Keep records dated on or after this day.
    pub since: Option<Date>,
    /// Keep records dated on or before this day.
    pub until: Option<Date>,
    /// Maximum number of records, counted from the newest.
    pub limit: Option<usize>,
}

impl RecordQuery {
    /// Create a query that matches every record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter to records dated on or after `date`.
    pub fn since(mut self, date: Date) -> Self {
        self.since = Some(date);
        self
    }

    /// Filter to records dated on or before `date`.
    pub fn until(mut self, date: Date) -> Self {
        self.until = Some(date);
        self
    }

    /// Keep at most the `limit` newest matching records.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Check a single record against the date filters.
    pub fn matches(&self, record: &SleepRecord) -> bool {
        if let Some(since) = self.since
            && record.date < since
        {
            return false;
        }
        if let Some(until) = self.until
            && record.date > until
        {
            return false;
        }
        true
    }

    /// Apply the query to a loaded history.
    pub fn apply(&self, records: Vec<SleepRecord>) -> Vec<SleepRecord> {
        let mut matching: Vec<SleepRecord> =
            records.into_iter().filter(|r| self.matches(r)).collect();
        if let Some(limit) = self.limit {
            let skip = matching.len().saturating_sub(limit);
            matching.drain(..skip);
        }
        matching
    }
}
