//! Core types for sleep tracking data.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use time::{Date, PrimitiveDateTime, Time};

use crate::format::{format_clock, format_date, format_timestamp};

/// One completed sleep session.
///
/// `date` is the calendar date of waking, `start` and `end` are wall-clock
/// times with whole-second precision. `hours` is the full elapsed duration
/// (which may cross midnight) rounded to two decimal places.
///
/// With the `serde` feature, all temporal fields serialize as the same
/// strings used in the persisted table:
///
/// ```
/// use sleeplog_types::SleepRecord;
/// use time::macros::{date, time};
///
/// let record = SleepRecord::new(date!(2024 - 01 - 02), time!(23:00), time!(6:30), 7.5);
/// let json = serde_json::to_string(&record).unwrap();
/// assert_eq!(
///     json,
///     r#"{"date":"2024-01-02","start":"23:00:00","end":"06:30:00","hours":7.5}"#
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SleepRecord {
    /// Calendar date of the end of the session.
    #[cfg_attr(feature = "serde", serde(with = "crate::format::serde_date"))]
    pub date: Date,
    /// Wall-clock time of sleep onset.
    #[cfg_attr(feature = "serde", serde(with = "crate::format::serde_clock"))]
    pub start: Time,
    /// Wall-clock time of waking.
    #[cfg_attr(feature = "serde", serde(with = "crate::format::serde_clock"))]
    pub end: Time,
    /// Duration in hours, rounded to 2 decimal places.
    pub hours: f64,
}

impl SleepRecord {
    /// Create a record from its persisted fields.
    #[must_use]
    pub fn new(date: Date, start: Time, end: Time, hours: f64) -> Self {
        Self {
            date,
            start,
            end,
            hours,
        }
    }

    /// Date as `YYYY-MM-DD`.
    #[must_use]
    pub fn date_string(&self) -> String {
        format_date(self.date)
    }

    /// Start time as `HH:MM:SS`.
    #[must_use]
    pub fn start_string(&self) -> String {
        format_clock(self.start)
    }

    /// End time as `HH:MM:SS`.
    #[must_use]
    pub fn end_string(&self) -> String {
        format_clock(self.end)
    }
}

impl fmt::Display for SleepRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}-{} ({:.2} h)",
            self.date_string(),
            self.start_string(),
            self.end_string(),
            self.hours
        )
    }
}

/// Whether a sleep session is currently open.
///
/// Serializes with an internal `state` tag:
/// `{"state":"idle"}` or `{"state":"active","since":"2024-01-01T23:00:00"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "state", rename_all = "lowercase"))]
pub enum SessionStatus {
    /// No session in progress.
    #[default]
    Idle,
    /// A session began at `since` and has not ended yet.
    Active {
        #[cfg_attr(feature = "serde", serde(with = "crate::format::serde_timestamp"))]
        since: PrimitiveDateTime,
    },
}

impl SessionStatus {
    /// Build a status from an optional pending start.
    #[must_use]
    pub fn from_pending(pending: Option<PrimitiveDateTime>) -> Self {
        match pending {
            Some(since) => SessionStatus::Active { since },
            None => SessionStatus::Idle,
        }
    }

    /// Returns `true` while a session is open.
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self, SessionStatus::Active { .. })
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionStatus::Idle => write!(f, "Idle"),
            SessionStatus::Active { since } => write!(f, "Sleeping since {}", format_timestamp(*since)),
        }
    }
}
