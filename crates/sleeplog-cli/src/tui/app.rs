//! Application state for the TUI dashboard.
//!
//! [`App`] owns the [`Logbook`] and the latest [`Summary`] computed from it.
//! Every session change goes through the logbook first and the summary is
//! rebuilt afterwards, so the panels always show what is on disk.

use std::time::Instant;

use time::PrimitiveDateTime;

use sleeplog_core::{SessionStatus, Summary, Threshold};
use sleeplog_types::format::{format_clock, format_hours};

use crate::logbook::{Ended, Logbook};

/// Step used when adjusting the threshold from the keyboard.
pub const THRESHOLD_STEP_HOURS: f64 = 0.5;

/// Maximum number of status messages kept in the queue.
const MAX_STATUS_MESSAGES: usize = 5;

/// An action waiting for a yes/no answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    /// Discard the session started at this instant.
    CancelSession { started_at: PrimitiveDateTime },
}

/// Main application state for the TUI.
pub struct App {
    logbook: Logbook,
    /// Summary of the stored history.
    pub summary: Summary,
    /// Insufficient-sleep threshold.
    pub threshold: Threshold,
    /// Number of records in the recent window.
    pub window: usize,
    /// Queue of status messages with timestamps.
    pub status_messages: Vec<(String, Instant)>,
    /// Seconds before a status message expires.
    pub status_message_timeout: u64,
    /// Whether the help overlay is visible.
    pub show_help: bool,
    /// Action awaiting confirmation.
    pub pending_confirmation: Option<PendingAction>,
    /// Last error shown in the header.
    pub last_error: Option<String>,
    /// Whether the application should exit.
    pub should_quit: bool,
}

impl App {
    /// Create the application state and load the initial summary.
    pub fn new(logbook: Logbook, threshold: Threshold, window: usize) -> Self {
        let mut app = Self {
            logbook,
            summary: sleeplog_core::summarize(&[], window, threshold),
            threshold,
            window,
            status_messages: Vec::new(),
            status_message_timeout: 5,
            show_help: false,
            pending_confirmation: None,
            last_error: None,
            should_quit: false,
        };
        app.refresh_summary();
        app
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Current session state.
    pub fn status(&self) -> SessionStatus {
        self.logbook.tracker().status()
    }

    /// Minutes elapsed in the open session, if any.
    pub fn elapsed_minutes(&self, now: PrimitiveDateTime) -> Option<i64> {
        self.logbook
            .tracker()
            .elapsed(now)
            .map(|d| d.whole_minutes().max(0))
    }

    /// Add a status message to the queue.
    pub fn push_status_message(&mut self, message: String) {
        self.status_messages.push((message, Instant::now()));
        while self.status_messages.len() > MAX_STATUS_MESSAGES {
            self.status_messages.remove(0);
        }
    }

    /// Remove status messages older than the timeout.
    pub fn clean_expired_messages(&mut self) {
        let timeout = std::time::Duration::from_secs(self.status_message_timeout);
        self.status_messages
            .retain(|(_, created)| created.elapsed() < timeout);
    }

    /// The most recent status message, if any.
    pub fn current_status_message(&self) -> Option<&str> {
        self.status_messages.last().map(|(msg, _)| msg.as_str())
    }

    fn report_error(&mut self, context: &str, err: anyhow::Error) {
        tracing::warn!("{}: {:#}", context, err);
        let message = format!("{}: {:#}", context, err);
        self.last_error = Some(message.clone());
        self.push_status_message(message);
    }

    /// Rebuild the summary from the table.
    pub fn refresh_summary(&mut self) {
        match self.logbook.summary(self.window, self.threshold) {
            Ok(summary) => {
                self.summary = summary;
                self.last_error = None;
            }
            Err(e) => self.report_error("Failed to load sleep log", e),
        }
    }

    /// Re-read the session file and the table.
    pub fn reload(&mut self) {
        if let Err(e) = self.logbook.reload_session() {
            self.report_error("Failed to reload session", e);
            return;
        }
        self.refresh_summary();
        if self.last_error.is_none() {
            self.push_status_message("Reloaded".to_string());
        }
    }

    /// Begin a session at `now`.
    pub fn start_sleep(&mut self, now: PrimitiveDateTime) {
        match self.logbook.begin(now) {
            Ok(began) => {
                let message = match began.replaced {
                    Some(previous) => format!(
                        "Restarted sleep at {} (was {})",
                        format_clock(began.started_at.time()),
                        format_clock(previous.time())
                    ),
                    None => format!("Sleep started at {}", format_clock(began.started_at.time())),
                };
                self.push_status_message(message);
            }
            Err(e) => self.report_error("Failed to start sleep", e),
        }
    }

    /// End the open session at `now` and record it.
    pub fn end_sleep(&mut self, now: PrimitiveDateTime) {
        match self.logbook.end(now) {
            Ok(Ended::Recorded(record)) => {
                let mut message = format!("You slept {:.2} hours", record.hours);
                if self.threshold.is_below(record.hours) {
                    message.push_str(&format!(
                        " - less than {} hours! {}",
                        format_hours(self.threshold.hours()),
                        self.threshold.evaluate(record.hours).action()
                    ));
                }
                self.push_status_message(message);
                self.refresh_summary();
            }
            Ok(Ended::NoActiveSession) => {
                self.push_status_message("Start sleep first!".to_string());
            }
            Err(e) => self.report_error("Failed to end sleep", e),
        }
    }

    /// Ask for confirmation before discarding the open session.
    pub fn request_cancel(&mut self) {
        match self.logbook.tracker().pending_start() {
            Some(started_at) => {
                self.pending_confirmation = Some(PendingAction::CancelSession { started_at });
            }
            None => self.push_status_message("No sleep session in progress".to_string()),
        }
    }

    /// Carry out the pending action.
    pub fn confirm_pending(&mut self) {
        match self.pending_confirmation.take() {
            Some(PendingAction::CancelSession { .. }) => match self.logbook.cancel() {
                Ok(Some(_)) => self.push_status_message("Sleep session discarded".to_string()),
                Ok(None) => self.push_status_message("No sleep session in progress".to_string()),
                Err(e) => self.report_error("Failed to cancel session", e),
            },
            None => {}
        }
    }

    /// Drop the pending action.
    pub fn dismiss_pending(&mut self) {
        if self.pending_confirmation.take().is_some() {
            self.push_status_message("Cancelled".to_string());
        }
    }

    /// Move the threshold by `delta` hours, keeping it positive.
    pub fn adjust_threshold(&mut self, delta: f64) {
        if let Some(threshold) = Threshold::new(self.threshold.hours() + delta) {
            self.threshold = threshold;
            self.push_status_message(format!(
                "Threshold: {} hours",
                format_hours(threshold.hours())
            ));
            self.refresh_summary();
        }
    }
}
