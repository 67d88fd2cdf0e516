//! Local persistence for sleeplog sleep records.
//!
//! This crate stores completed sleep sessions in a single CSV file and keeps
//! the open session, if any, in a small JSON file beside it.
//!
//! # Features
//!
//! - Create the table with its header on first use
//! - Append one record per completed session, never rewriting prior rows
//! - Load the full history in file order
//! - Query by date range with a limit
//! - Persist the pending session between processes
//!
//! # Example
//!
//! ```no_run
//! use sleeplog_store::{RecordQuery, RecordStore};
//!
//! let store = RecordStore::open(sleeplog_store::default_log_path())?;
//!
//! // Last week of records
//! let records = store.query(&RecordQuery::new().limit(7))?;
//! # Ok::<(), sleeplog_store::Error>(())
//! ```

mod error;
mod queries;
mod session;
mod store;

pub use error::{Error, Result};
pub use queries::RecordQuery;
pub use session::{PendingSession, SessionFile};
pub use store::{RecordStore, append, ensure_initialized, load_all};

/// File name of the default table.
pub const DEFAULT_LOG_FILE: &str = "sleep_log.csv";

/// Default table path, relative to the working directory.
pub fn default_log_path() -> std::path::PathBuf {
    std::path::PathBuf::from(DEFAULT_LOG_FILE)
}
