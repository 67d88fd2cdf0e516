//! Error types for sleeplog-core.
//!
//! # Recovery
//!
//! | Error | Strategy |
//! |-------|----------|
//! | [`Error::NoActiveSession`] | Recover locally: tell the user to start a session first |
//! | [`Error::EmptyInput`] | Recover locally: show the "no data yet" state |
//! | [`Error::InvalidInterval`] | Report; the session stays open so the end can be retried |
//!
//! None of these errors leave the tracker in a changed state.

use thiserror::Error;
use time::PrimitiveDateTime;

use sleeplog_types::format::format_timestamp;

/// Errors produced by session tracking and aggregation.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new error variants
/// in future versions without breaking downstream code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum Error {
    /// A session was ended without one having been started.
    #[error("No sleep session in progress")]
    NoActiveSession,

    /// An aggregate was requested over zero records.
    #[error("No sleep records to aggregate")]
    EmptyInput,

    /// The end of a session lies before its start.
    #[error(
        "Session end {} is before its start {}",
        format_timestamp(*.end),
        format_timestamp(*.start)
    )]
    InvalidInterval {
        /// Recorded start of the session.
        start: PrimitiveDateTime,
        /// Rejected end instant.
        end: PrimitiveDateTime,
    },
}

/// Result type alias using sleeplog-core's Error type.
pub type Result<T> = std::result::Result<T, Error>;
