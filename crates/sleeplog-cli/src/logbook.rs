//! Glue between the session tracker, the record store and the session file.
//!
//! Both front ends (subcommands and the dashboard) drive sleep sessions
//! through a [`Logbook`], so a session begun in one can be ended in the
//! other.

use std::path::Path;

use anyhow::{Context, Result};
use time::PrimitiveDateTime;
use tracing::{info, warn};

use sleeplog_core::{Error as CoreError, SessionTracker, SleepRecord, Summary, Threshold, stats};
use sleeplog_store::{RecordQuery, RecordStore, SessionFile};
use sleeplog_types::format::format_timestamp;

/// Outcome of beginning a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Began {
    /// Recorded start of the new session.
    pub started_at: PrimitiveDateTime,
    /// Start of a previously open session that was replaced.
    pub replaced: Option<PrimitiveDateTime>,
}

/// Outcome of ending a session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Ended {
    /// The session was closed and its record appended.
    Recorded(SleepRecord),
    /// There was no open session; nothing was written.
    NoActiveSession,
}

/// A sleep log table together with its open-session state.
#[derive(Debug)]
pub struct Logbook {
    store: RecordStore,
    session_file: SessionFile,
    tracker: SessionTracker,
}

impl Logbook {
    /// Open the table at `log_path` and restore any pending session.
    pub fn open(log_path: &Path) -> Result<Self> {
        let store = RecordStore::open(log_path)
            .with_context(|| format!("Failed to open sleep log {}", log_path.display()))?;
        let session_file = SessionFile::for_log(log_path);
        let pending = session_file.load().context("Failed to read pending session")?;
        Ok(Self {
            store,
            session_file,
            tracker: SessionTracker::with_pending(pending),
        })
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn tracker(&self) -> &SessionTracker {
        &self.tracker
    }

    /// Begin a session at `now`, replacing any open one.
    pub fn begin(&mut self, now: PrimitiveDateTime) -> Result<Began> {
        self.reload_session()?;
        let replaced = self.tracker.pending_start();
        if let Some(previous) = replaced {
            warn!(
                "Sleep already started at {}, restarting",
                format_timestamp(previous)
            );
        }
        let mut next = self.tracker;
        let started_at = next.begin_sleep(now);
        self.session_file
            .save(next.pending_start())
            .context("Failed to save pending session")?;
        self.tracker = next;
        info!("Sleep started at {}", format_timestamp(started_at));
        Ok(Began {
            started_at,
            replaced,
        })
    }

    /// End the open session at `now` and append its record.
    ///
    /// The pending session is re-read from disk first, so a session already
    /// ended by another process is not recorded twice. The session file is
    /// cleared before the append and restored if the append fails. The open
    /// session is also kept when `now` lies before the recorded start.
    pub fn end(&mut self, now: PrimitiveDateTime) -> Result<Ended> {
        self.reload_session()?;
        let started_at = self.tracker.pending_start();
        let mut next = self.tracker;
        let record = match next.end_sleep(now) {
            Ok(record) => record,
            Err(CoreError::NoActiveSession) => return Ok(Ended::NoActiveSession),
            Err(e) => return Err(e.into()),
        };

        self.session_file
            .save(None)
            .context("Failed to clear pending session")?;
        if let Err(e) = self.store.append(&record) {
            if let Err(restore) = self.session_file.save(started_at) {
                warn!("Failed to restore pending session: {}", restore);
            }
            return Err(anyhow::Error::new(e).context("Failed to append sleep record"));
        }
        self.tracker = next;
        Ok(Ended::Recorded(record))
    }

    /// Discard the open session without recording it.
    pub fn cancel(&mut self) -> Result<Option<PrimitiveDateTime>> {
        self.reload_session()?;
        let mut next = self.tracker;
        let discarded = next.cancel();
        if discarded.is_some() {
            self.session_file
                .save(None)
                .context("Failed to clear pending session")?;
            info!("Pending sleep session discarded");
        }
        self.tracker = next;
        Ok(discarded)
    }

    /// Re-read the pending session from disk.
    pub fn reload_session(&mut self) -> Result<()> {
        let pending = self
            .session_file
            .load()
            .context("Failed to read pending session")?;
        self.tracker = SessionTracker::with_pending(pending);
        Ok(())
    }

    /// Every stored record, in file order.
    pub fn records(&self) -> Result<Vec<SleepRecord>> {
        self.store.load_all().context("Failed to load sleep log")
    }

    /// Stored records matching `query`.
    pub fn query(&self, query: &RecordQuery) -> Result<Vec<SleepRecord>> {
        self.store.query(query).context("Failed to load sleep log")
    }

    /// Summary of the stored history.
    pub fn summary(&self, window: usize, threshold: Threshold) -> Result<Summary> {
        Ok(stats::summarize(&self.records()?, window, threshold))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use time::macros::datetime;

    fn logbook() -> (TempDir, Logbook) {
        let dir = TempDir::new().unwrap();
        let book = Logbook::open(&dir.path().join("sleep_log.csv")).unwrap();
        (dir, book)
    }

    #[test]
    fn test_begin_end_appends_record() {
        let (_dir, mut book) = logbook();
        let began = book.begin(datetime!(2024-01-01 23:00:00)).unwrap();
        assert_eq!(began.replaced, None);

        let ended = book.end(datetime!(2024-01-02 6:30:00)).unwrap();
        let Ended::Recorded(record) = ended else {
            panic!("expected a record");
        };
        assert_eq!(record.hours, 7.5);
        assert_eq!(book.records().unwrap(), vec![record]);
        assert!(!book.tracker().is_active());
    }

    #[test]
    fn test_end_without_begin_writes_nothing() {
        let (_dir, mut book) = logbook();
        assert_eq!(
            book.end(datetime!(2024-01-02 6:30:00)).unwrap(),
            Ended::NoActiveSession
        );
        assert!(book.records().unwrap().is_empty());
    }

    #[test]
    fn test_session_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sleep_log.csv");

        Logbook::open(&path)
            .unwrap()
            .begin(datetime!(2024-01-01 23:00:00))
            .unwrap();

        let mut book = Logbook::open(&path).unwrap();
        assert_eq!(
            book.tracker().pending_start(),
            Some(datetime!(2024-01-01 23:00:00))
        );
        book.end(datetime!(2024-01-02 7:00:00)).unwrap();

        let book = Logbook::open(&path).unwrap();
        assert!(!book.tracker().is_active());
        assert_eq!(book.records().unwrap().len(), 1);
    }

    #[test]
    fn test_double_begin_reports_replaced() {
        let (_dir, mut book) = logbook();
        book.begin(datetime!(2024-01-01 22:00:00)).unwrap();
        let began = book.begin(datetime!(2024-01-01 23:00:00)).unwrap();
        assert_eq!(began.replaced, Some(datetime!(2024-01-01 22:00:00)));
    }

    #[test]
    fn test_end_before_start_keeps_session() {
        let (_dir, mut book) = logbook();
        book.begin(datetime!(2024-01-01 23:00:00)).unwrap();
        assert!(book.end(datetime!(2024-01-01 22:00:00)).is_err());
        assert!(book.tracker().is_active());
        assert!(book.records().unwrap().is_empty());
    }

    #[test]
    fn test_cancel() {
        let (_dir, mut book) = logbook();
        assert_eq!(book.cancel().unwrap(), None);
        book.begin(datetime!(2024-01-01 23:00:00)).unwrap();
        assert_eq!(
            book.cancel().unwrap(),
            Some(datetime!(2024-01-01 23:00:00))
        );
        book.reload_session().unwrap();
        assert!(!book.tracker().is_active());
    }

    #[test]
    fn test_session_ended_elsewhere_is_not_recorded_twice() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sleep_log.csv");

        let mut dashboard = Logbook::open(&path).unwrap();
        dashboard.begin(datetime!(2024-01-01 23:00:00)).unwrap();

        let mut cli = Logbook::open(&path).unwrap();
        assert!(matches!(
            cli.end(datetime!(2024-01-02 6:30:00)).unwrap(),
            Ended::Recorded(_)
        ));

        assert_eq!(
            dashboard.end(datetime!(2024-01-02 6:31:00)).unwrap(),
            Ended::NoActiveSession
        );
        assert_eq!(dashboard.records().unwrap().len(), 1);
        assert!(!dashboard.tracker().is_active());
    }

    #[test]
    fn test_session_begun_elsewhere_can_be_ended() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sleep_log.csv");

        let mut dashboard = Logbook::open(&path).unwrap();
        let mut cli = Logbook::open(&path).unwrap();
        cli.begin(datetime!(2024-01-01 23:00:00)).unwrap();

        let Ended::Recorded(record) = dashboard.end(datetime!(2024-01-02 7:00:00)).unwrap() else {
            panic!("expected a record");
        };
        assert_eq!(record.hours, 8.0);
        assert_eq!(cli.cancel().unwrap(), None);
    }

    #[test]
    fn test_failed_append_keeps_pending_session() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sleep_log.csv");
        let mut book = Logbook::open(&path).unwrap();
        book.begin(datetime!(2024-01-01 23:00:00)).unwrap();

        // A header without the hours column cannot take new rows
        std::fs::write(&path, "date,start,end\n").unwrap();
        assert!(book.end(datetime!(2024-01-02 7:00:00)).is_err());

        assert!(book.tracker().is_active());
        assert_eq!(
            SessionFile::for_log(&path).load().unwrap(),
            Some(datetime!(2024-01-01 23:00:00))
        );
    }

    #[test]
    fn test_summary() {
        let (_dir, mut book) = logbook();
        book.begin(datetime!(2024-01-01 10:00:00)).unwrap();
        book.end(datetime!(2024-01-01 15:00:00)).unwrap();

        let summary = book.summary(7, Threshold::default()).unwrap();
        assert_eq!(summary.total_records, 1);
        assert_eq!(summary.average_hours, Some(5.0));
        assert!(summary.warning);
    }
}
