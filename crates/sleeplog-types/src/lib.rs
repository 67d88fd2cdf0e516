//! Shared types for the sleeplog sleep tracker.
//!
//! This crate holds the data model used by the tracker core, the CSV store
//! and the presentation layers, so that none of them depend on each other
//! just to name a record.
//!
//! # Features
//!
//! - [`SleepRecord`]: one completed sleep session
//! - [`SessionStatus`]: whether a session is currently open
//! - Fixed textual forms for dates, clock times and durations ([`format`])
//! - Error types for parsing those forms
//!
//! # Example
//!
//! ```
//! use sleeplog_types::{SleepRecord, format};
//!
//! let date = format::parse_date("2024-01-02")?;
//! let start = format::parse_clock("23:00:00")?;
//! let end = format::parse_clock("06:30:00")?;
//! let record = SleepRecord::new(date, start, end, 7.5);
//! assert_eq!(record.to_string(), "2024-01-02 23:00:00-06:30:00 (7.50 h)");
//! # Ok::<(), sleeplog_types::ParseError>(())
//! ```

pub mod error;
pub mod format;
pub mod types;

pub use error::{ParseError, ParseResult};
pub use types::{SessionStatus, SleepRecord};

/// Duration below which a night counts as insufficient sleep.
pub const DEFAULT_THRESHOLD_HOURS: f64 = 7.0;

/// Number of records shown in the recent window.
pub const DEFAULT_RECENT_WINDOW: usize = 7;

/// Column names of the persisted table, in order.
pub const COLUMNS: [&str; 4] = ["date", "start", "end", "hours"];
