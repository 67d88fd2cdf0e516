//! Error types for sleeplog-store.

use std::path::PathBuf;

use sleeplog_types::ParseError;

/// Result type for sleeplog-store operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in sleeplog-store.
///
/// Every variant is a storage failure: the table or session file is
/// missing, unwritable or malformed. None of them are retried.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Failed to create the directory holding the table.
    #[error("Failed to create directory {path}: {source}")]
    CreateDirectory {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to read or write a file.
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The CSV layer rejected the file.
    #[error("CSV error in {path}: {source}")]
    Csv { path: PathBuf, source: csv::Error },

    /// The header lacks a required column.
    #[error("Missing column '{column}' in {path}")]
    MissingColumn { path: PathBuf, column: &'static str },

    /// A data row could not be converted into a record.
    #[error("Malformed row at line {line} in {path}: {source}")]
    MalformedRow {
        path: PathBuf,
        line: u64,
        source: ParseError,
    },

    /// The pending-session file could not be (de)serialized.
    #[error("Malformed session file {path}: {source}")]
    SessionFile {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl Error {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Error::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn csv(path: &std::path::Path, source: csv::Error) -> Self {
        Error::Csv {
            path: path.to_path_buf(),
            source,
        }
    }
}
