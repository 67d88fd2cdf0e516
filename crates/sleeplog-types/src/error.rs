//! Error types for parsing sleeplog values.

use thiserror::Error;

/// Errors that can occur when parsing the textual forms of sleep records.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new error variants
/// in future versions without breaking downstream code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// A calendar date was not in `YYYY-MM-DD` form.
    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    /// A wall-clock time was not in `HH:MM:SS` form.
    #[error("Invalid time '{0}': expected HH:MM:SS")]
    InvalidTime(String),

    /// A full timestamp could not be parsed.
    #[error("Invalid timestamp '{0}': expected YYYY-MM-DDTHH:MM[:SS] or YYYY-MM-DD HH:MM[:SS]")]
    InvalidTimestamp(String),

    /// A duration was not a finite, non-negative number.
    #[error("Invalid hours value '{0}': expected a non-negative number")]
    InvalidHours(String),
}

/// Result type alias using sleeplog-types' ParseError type.
pub type ParseResult<T> = std::result::Result<T, ParseError>;
