//! Session tracking and aggregation for the sleeplog sleep tracker.
//!
//! This crate is the logic between the presentation layers and the record
//! store:
//!
//! - [`SessionTracker`]: begin and end sleep sessions, producing
//!   [`SleepRecord`]s
//! - [`stats`]: recent window, mean duration and threshold checks over the
//!   record history
//! - [`Threshold`]: the configurable insufficient-sleep threshold
//!
//! Nothing here performs I/O or reads the clock. Callers own the tracker,
//! pass in "now", and hand completed records to the store.
//!
//! # Quick Start
//!
//! ```
//! use sleeplog_core::{SessionTracker, Threshold, stats};
//! use time::macros::datetime;
//!
//! let mut tracker = SessionTracker::new();
//! tracker.begin_sleep(datetime!(2024-01-01 10:00:00));
//! let record = tracker.end_sleep(datetime!(2024-01-01 15:00:00))?;
//!
//! assert_eq!(record.hours, 5.0);
//! assert!(Threshold::default().is_below(record.hours));
//!
//! let summary = stats::summarize(&[record], 7, Threshold::default());
//! assert!(summary.warning);
//! # Ok::<(), sleeplog_core::Error>(())
//! ```

pub mod error;
pub mod stats;
pub mod thresholds;
pub mod tracker;

pub use error::{Error, Result};
pub use stats::{NO_DATA_MESSAGE, Summary, below_threshold, mean_hours, recent, summarize};
pub use thresholds::{NEAR_THRESHOLD_HOURS, SleepLevel, Threshold};
pub use tracker::{SessionTracker, duration_hours};

// Re-export from sleeplog-types
pub use sleeplog_types::{
    DEFAULT_RECENT_WINDOW, DEFAULT_THRESHOLD_HOURS, SessionStatus, SleepRecord,
};
