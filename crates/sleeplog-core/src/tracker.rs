//! Session tracking.
//!
//! A [`SessionTracker`] is a two-state machine:
//!
//! | State | `pending_start` | `begin_sleep` | `end_sleep` |
//! |-------|-----------------|---------------|-------------|
//! | Idle | `None` | → Active | [`Error::NoActiveSession`] |
//! | Active | `Some(start)` | → Active (start replaced) | → Idle, emits a [`SleepRecord`] |
//!
//! The tracker never reads the clock. Every transition takes `now` from the
//! caller, which keeps it deterministic under test.
//!
//! # Example
//!
//! ```
//! use sleeplog_core::SessionTracker;
//! use time::macros::datetime;
//!
//! let mut tracker = SessionTracker::new();
//! tracker.begin_sleep(datetime!(2024-01-01 23:00:00));
//! let record = tracker.end_sleep(datetime!(2024-01-02 06:30:00))?;
//!
//! assert_eq!(record.hours, 7.5);
//! assert_eq!(record.date_string(), "2024-01-02");
//! assert!(!tracker.is_active());
//! # Ok::<(), sleeplog_core::Error>(())
//! ```

use time::{Duration, PrimitiveDateTime};
use tracing::{debug, warn};

use sleeplog_types::format::{format_timestamp, round_hours, whole_seconds};
use sleeplog_types::{SessionStatus, SleepRecord};

use crate::error::{Error, Result};

/// Holds the start of the sleep session in progress, if any.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionTracker {
    pending_start: Option<PrimitiveDateTime>,
}

impl SessionTracker {
    /// Create an idle tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a tracker from a previously persisted pending start.
    pub fn with_pending(pending_start: Option<PrimitiveDateTime>) -> Self {
        Self { pending_start }
    }

    /// Start of the open session, if any.
    pub fn pending_start(&self) -> Option<PrimitiveDateTime> {
        self.pending_start
    }

    /// Returns `true` while a session is open.
    pub fn is_active(&self) -> bool {
        self.pending_start.is_some()
    }

    /// Current state as a [`SessionStatus`].
    pub fn status(&self) -> SessionStatus {
        SessionStatus::from_pending(self.pending_start)
    }

    /// Time slept so far in the open session.
    ///
    /// Returns `None` when idle. A `now` earlier than the start yields a
    /// negative duration.
    pub fn elapsed(&self, now: PrimitiveDateTime) -> Option<Duration> {
        self.pending_start.map(|start| now - start)
    }

    /// Begin a sleep session at `now` and return the recorded start.
    ///
    /// Calling this while a session is already open replaces the previous
    /// start; the earlier start is discarded without producing a record.
    pub fn begin_sleep(&mut self, now: PrimitiveDateTime) -> PrimitiveDateTime {
        if let Some(previous) = self.pending_start {
            debug!(
                "Replacing pending sleep start {} with {}",
                format_timestamp(previous),
                format_timestamp(now)
            );
        }
        self.pending_start = Some(now);
        now
    }

    /// End the open session at `now` and return the completed record.
    ///
    /// # Errors
    ///
    /// - [`Error::NoActiveSession`] when idle. Nothing changes.
    /// - [`Error::InvalidInterval`] when `now` is before the start. The
    ///   session stays open.
    pub fn end_sleep(&mut self, now: PrimitiveDateTime) -> Result<SleepRecord> {
        let start = self.pending_start.ok_or(Error::NoActiveSession)?;
        if now < start {
            warn!(
                "Rejecting session end {} before start {}",
                format_timestamp(now),
                format_timestamp(start)
            );
            return Err(Error::InvalidInterval { start, end: now });
        }

        let record = SleepRecord::new(
            now.date(),
            whole_seconds(start.time()),
            whole_seconds(now.time()),
            duration_hours(start, now),
        );
        self.pending_start = None;
        debug!("Completed sleep session: {}", record);
        Ok(record)
    }

    /// Discard the open session without producing a record.
    ///
    /// Returns the discarded start, or `None` if the tracker was idle.
    pub fn cancel(&mut self) -> Option<PrimitiveDateTime> {
        self.pending_start.take()
    }
}

/// Hours between two instants, rounded to two decimal places.
pub fn duration_hours(start: PrimitiveDateTime, end: PrimitiveDateTime) -> f64 {
    round_hours((end - start).as_seconds_f64() / 3600.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime, time};

    #[test]
    fn test_new_tracker_is_idle() {
        let tracker = SessionTracker::new();
        assert!(!tracker.is_active());
        assert_eq!(tracker.pending_start(), None);
        assert_eq!(tracker.status(), SessionStatus::Idle);
    }

    #[test]
    fn test_overnight_session() {
        let mut tracker = SessionTracker::new();
        let start = tracker.begin_sleep(datetime!(2024-01-01 23:00:00));
        assert_eq!(start, datetime!(2024-01-01 23:00:00));
        assert!(tracker.is_active());

        let record = tracker.end_sleep(datetime!(2024-01-02 06:30:00)).unwrap();
        assert_eq!(record.date, date!(2024 - 01 - 02));
        assert_eq!(record.start, time!(23:00:00));
        assert_eq!(record.end, time!(6:30:00));
        assert_eq!(record.hours, 7.5);
        assert!(!tracker.is_active());
    }

    #[test]
    fn test_same_day_session() {
        let mut tracker = SessionTracker::new();
        tracker.begin_sleep(datetime!(2024-01-01 10:00:00));
        let record = tracker.end_sleep(datetime!(2024-01-01 15:00:00)).unwrap();
        assert_eq!(record.hours, 5.0);
        assert_eq!(record.date, date!(2024 - 01 - 01));
    }

    #[test]
    fn test_end_while_idle_is_rejected() {
        let mut tracker = SessionTracker::new();
        let result = tracker.end_sleep(datetime!(2024-01-02 06:30:00));
        assert_eq!(result, Err(Error::NoActiveSession));
        assert_eq!(tracker, SessionTracker::new());
    }

    #[test]
    fn test_second_end_is_rejected() {
        let mut tracker = SessionTracker::new();
        tracker.begin_sleep(datetime!(2024-01-01 23:00:00));
        tracker.end_sleep(datetime!(2024-01-02 06:30:00)).unwrap();
        assert_eq!(
            tracker.end_sleep(datetime!(2024-01-02 07:00:00)),
            Err(Error::NoActiveSession)
        );
    }

    #[test]
    fn test_double_begin_replaces_start() {
        let mut tracker = SessionTracker::new();
        tracker.begin_sleep(datetime!(2024-01-01 22:00:00));
        tracker.begin_sleep(datetime!(2024-01-01 23:00:00));
        assert_eq!(tracker.pending_start(), Some(datetime!(2024-01-01 23:00:00)));

        let record = tracker.end_sleep(datetime!(2024-01-02 07:00:00)).unwrap();
        assert_eq!(record.hours, 8.0);
    }

    #[test]
    fn test_end_before_start_keeps_session_open() {
        let mut tracker = SessionTracker::new();
        tracker.begin_sleep(datetime!(2024-01-01 23:00:00));
        let result = tracker.end_sleep(datetime!(2024-01-01 22:00:00));
        assert!(matches!(result, Err(Error::InvalidInterval { .. })));
        assert_eq!(tracker.pending_start(), Some(datetime!(2024-01-01 23:00:00)));
    }

    #[test]
    fn test_zero_length_session() {
        let mut tracker = SessionTracker::new();
        tracker.begin_sleep(datetime!(2024-01-01 23:00:00));
        let record = tracker.end_sleep(datetime!(2024-01-01 23:00:00)).unwrap();
        assert_eq!(record.hours, 0.0);
    }

    #[test]
    fn test_subsecond_precision_is_used_for_hours_only() {
        let mut tracker = SessionTracker::new();
        tracker.begin_sleep(datetime!(2024-01-01 23:00:00.9));
        let record = tracker.end_sleep(datetime!(2024-01-02 06:30:00.4)).unwrap();
        assert_eq!(record.start, time!(23:00:00));
        assert_eq!(record.end, time!(6:30:00));
        assert_eq!(record.hours, 7.5);
    }

    #[test]
    fn test_restore_and_cancel() {
        let since = datetime!(2024-01-01 23:00:00);
        let mut tracker = SessionTracker::with_pending(Some(since));
        assert_eq!(tracker.status(), SessionStatus::Active { since });
        assert_eq!(
            tracker.elapsed(datetime!(2024-01-02 01:00:00)),
            Some(Duration::hours(2))
        );

        assert_eq!(tracker.cancel(), Some(since));
        assert!(!tracker.is_active());
        assert_eq!(tracker.cancel(), None);
        assert_eq!(tracker.elapsed(since), None);
    }

    #[test]
    fn test_duration_hours_rounding() {
        assert_eq!(
            duration_hours(datetime!(2024-01-01 23:00:00), datetime!(2024-01-02 06:20:00)),
            7.33
        );
        assert_eq!(
            duration_hours(datetime!(2024-01-01 23:00:00), datetime!(2024-01-01 23:00:30)),
            0.01
        );
    }

    #[test]
    fn test_end_sleep_rounds_half_hundredth_to_even() {
        let mut tracker = SessionTracker::new();
        tracker.begin_sleep(datetime!(2024-01-01 23:00:00));
        let record = tracker.end_sleep(datetime!(2024-01-02 06:37:30)).unwrap();
        assert_eq!(record.hours, 7.62);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use time::OffsetDateTime;

    fn instant(unix: i64) -> PrimitiveDateTime {
        let odt = OffsetDateTime::from_unix_timestamp(unix).unwrap();
        PrimitiveDateTime::new(odt.date(), odt.time())
    }

    proptest! {
        /// Completed sessions report the rounded elapsed hours and are never negative.
        #[test]
        fn end_after_begin_reports_rounded_hours(
            start in 0i64..4_000_000_000,
            delta in 0i64..(14 * 24 * 3600),
        ) {
            let mut tracker = SessionTracker::new();
            let begin = instant(start);
            let end = instant(start + delta);

            tracker.begin_sleep(begin);
            let record = tracker.end_sleep(end).unwrap();

            let expected = ((delta as f64 / 3600.0) * 100.0).round_ties_even() / 100.0;
            prop_assert_eq!(record.hours, expected);
            prop_assert!(record.hours >= 0.0);
            prop_assert_eq!(record.date, end.date());
            prop_assert_eq!(record.start, begin.time());
            prop_assert_eq!(record.end, end.time());
            prop_assert!(!tracker.is_active());
        }

        /// Ending while idle never produces a record.
        #[test]
        fn end_while_idle_always_fails(now in 0i64..4_000_000_000) {
            let mut tracker = SessionTracker::new();
            prop_assert_eq!(tracker.end_sleep(instant(now)), Err(Error::NoActiveSession));
            prop_assert!(!tracker.is_active());
        }
    }
}
