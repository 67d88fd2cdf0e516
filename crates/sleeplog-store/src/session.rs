//! Persistence of the open sleep session.
//!
//! Each CLI invocation is a separate process, so the start of an open
//! session is kept in a small JSON file next to the table:
//!
//! ```text
//! sleep_log.csv
//! sleep_log.session.json   {"started_at":"2024-01-01T23:00:00"}
//! ```
//!
//! The file exists only while a session is open.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use time::PrimitiveDateTime;
use tracing::debug;

use crate::error::{Error, Result};

/// On-disk form of an open session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingSession {
    #[serde(with = "sleeplog_types::format::serde_timestamp")]
    pub started_at: PrimitiveDateTime,
}

/// Handle to the pending-session file of one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionFile {
    path: PathBuf,
}

impl SessionFile {
    /// Use an explicit session file path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// The session file belonging to the table at `log_path`.
    ///
    /// `data/sleep_log.csv` maps to `data/sleep_log.session.json`.
    pub fn for_log(log_path: &Path) -> Self {
        let stem = log_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "sleep_log".to_string());
        Self {
            path: log_path.with_file_name(format!("{stem}.session.json")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the pending start, or `None` when no session is open.
    pub fn load(&self) -> Result<Option<PrimitiveDateTime>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(Error::io(&self.path, e)),
        };
        let pending: PendingSession =
            serde_json::from_str(&content).map_err(|source| Error::SessionFile {
                path: self.path.clone(),
                source,
            })?;
        Ok(Some(pending.started_at))
    }

    /// Persist the pending start. `None` removes the file.
    pub fn save(&self, pending: Option<PrimitiveDateTime>) -> Result<()> {
        match pending {
            Some(started_at) => {
                let json = serde_json::to_string(&PendingSession { started_at }).map_err(
                    |source| Error::SessionFile {
                        path: self.path.clone(),
                        source,
                    },
                )?;
                if let Some(parent) = self.path.parent()
                    && !parent.as_os_str().is_empty()
                    && !parent.exists()
                {
                    fs::create_dir_all(parent).map_err(|e| Error::CreateDirectory {
                        path: parent.to_path_buf(),
                        source: e,
                    })?;
                }
                fs::write(&self.path, json).map_err(|e| Error::io(&self.path, e))?;
                debug!("Saved pending session to {}", self.path.display());
            }
            None => match fs::remove_file(&self.path) {
                Ok(()) => debug!("Removed pending session {}", self.path.display()),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(Error::io(&self.path, e)),
            },
        }
        Ok(())
    }
}
