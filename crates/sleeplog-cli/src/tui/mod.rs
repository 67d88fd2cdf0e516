//! Main entry point for the TUI dashboard.
//!
//! The dashboard shows the current session, the recent records with their
//! average and a trend chart, and lets the user start, end or discard a
//! session from the keyboard. It shares the table and session file with the
//! subcommands.

pub mod app;
pub mod input;
pub mod ui;

pub use app::App;

use std::io::{self, stdout};
use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    ExecutableCommand,
    event::{self, Event, KeyEventKind},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use tracing::info;

use crate::config::{Config, resolve_threshold, resolve_window};
use crate::logbook::Logbook;

/// Set up the terminal for TUI rendering.
///
/// Enables raw mode and switches to the alternate screen buffer.
pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to its original state.
pub fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Run the TUI application against the table at `log_path`.
pub fn run(log_path: &Path, config: &Config) -> Result<()> {
    let threshold = resolve_threshold(None, config)?;
    let window = resolve_window(None, config);
    info!("Dashboard using sleep log {}", log_path.display());

    // Open before touching the terminal so errors print normally
    let logbook = Logbook::open(log_path)?;
    let mut app = App::new(logbook, threshold, window);

    let mut terminal = setup_terminal()?;

    // Run the app and ensure terminal is restored even on error
    let result = run_event_loop(&mut terminal, &mut app);

    restore_terminal()?;

    result
}

/// Main event loop for the TUI.
fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    while !app.should_quit() {
        app.clean_expired_messages();

        terminal.draw(|f| ui::draw(f, app))?;

        // Poll for events with a timeout so the elapsed time keeps ticking
        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            let action = input::handle_key(key.code, app.pending_confirmation.is_some());
            input::apply_action(app, action)?;
        }
    }

    Ok(())
}
