//! Keyboard input handling for the TUI.
//!
//! # Key Bindings
//!
//! | Key       | Action              |
//! |-----------|---------------------|
//! | `s`       | Start sleep         |
//! | `e`       | End sleep           |
//! | `x`       | Cancel session      |
//! | `r`       | Reload from disk    |
//! | `+` / `-` | Adjust threshold    |
//! | `?`       | Toggle help         |
//! | `q`/`Esc` | Quit                |

use anyhow::Result;
use crossterm::event::KeyCode;

use super::app::{App, THRESHOLD_STEP_HOURS};
use crate::clock::local_now;

/// User actions that can be triggered by keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Quit the application.
    Quit,
    /// Begin a sleep session now.
    StartSleep,
    /// End the open session now.
    EndSleep,
    /// Ask to discard the open session.
    CancelSession,
    /// Re-read the log and session file.
    Reload,
    /// Raise the threshold.
    IncreaseThreshold,
    /// Lower the threshold.
    DecreaseThreshold,
    /// Toggle the help overlay.
    ToggleHelp,
    /// Confirm the pending action.
    Confirm,
    /// Dismiss the pending action.
    Dismiss,
    /// No action.
    None,
}

/// Map a key to an action.
///
/// While a confirmation dialog is open only Y/N (and Esc) are handled.
pub fn handle_key(key: KeyCode, has_pending_confirmation: bool) -> Action {
    if has_pending_confirmation {
        return match key {
            KeyCode::Char('y') | KeyCode::Char('Y') => Action::Confirm,
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Action::Dismiss,
            _ => Action::None,
        };
    }

    match key {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char('s') => Action::StartSleep,
        KeyCode::Char('e') => Action::EndSleep,
        KeyCode::Char('x') => Action::CancelSession,
        KeyCode::Char('r') => Action::Reload,
        KeyCode::Char('+') | KeyCode::Char('=') => Action::IncreaseThreshold,
        KeyCode::Char('-') | KeyCode::Char('_') => Action::DecreaseThreshold,
        KeyCode::Char('?') => Action::ToggleHelp,
        _ => Action::None,
    }
}

/// Apply an action to the application state.
///
/// Session actions are stamped with the local time when they are applied.
pub fn apply_action(app: &mut App, action: Action) -> Result<()> {
    match action {
        Action::Quit => app.should_quit = true,
        Action::StartSleep => app.start_sleep(local_now()?),
        Action::EndSleep => app.end_sleep(local_now()?),
        Action::CancelSession => app.request_cancel(),
        Action::Reload => app.reload(),
        Action::IncreaseThreshold => app.adjust_threshold(THRESHOLD_STEP_HOURS),
        Action::DecreaseThreshold => app.adjust_threshold(-THRESHOLD_STEP_HOURS),
        Action::ToggleHelp => app.show_help = !app.show_help,
        Action::Confirm => app.confirm_pending(),
        Action::Dismiss => app.dismiss_pending(),
        Action::None => {}
    }
    Ok(())
}
