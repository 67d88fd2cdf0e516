//! Command-line interface and terminal dashboard for the sleeplog sleep tracker.
//!
//! `sleeplog` records when you go to sleep and when you wake up, appends each
//! completed night to a CSV table, and summarizes the recent history against
//! an insufficient-sleep threshold.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `start` | Mark the start of a sleep session |
//! | `end` | End the session and record it |
//! | `cancel` | Discard the open session |
//! | `status` | Show whether a session is open |
//! | `summary` | Recent records, average and trend chart |
//! | `history` | List or export stored records |
//! | `config` | Manage CLI configuration |
//! | `completions` | Generate shell completions |
//! | `tui` | Launch the interactive dashboard |
//!
//! # Output Formats
//!
//! - **Text** (default): Human-readable colored output
//! - **JSON**: Machine-readable JSON format
//! - **CSV**: The same `date,start,end,hours` layout as the log itself
//!
//! # Configuration
//!
//! Settings live in `~/.config/sleeplog/config.toml` (or platform equivalent,
//! or the path in `SLEEPLOG_CONFIG`):
//!
//! - `log_file`: Sleep log table path
//! - `threshold`: Insufficient-sleep threshold in hours
//! - `window`: Number of records in the recent window
//! - `no_color`: Disable colored output
//! - `format`: Default output format
//!
//! # Environment Variables
//!
//! - `SLEEPLOG_FILE`: Sleep log table (overridden by `--file`)
//! - `SLEEPLOG_STYLE`: Visual styling mode
//! - `NO_COLOR`: Disable colored output when set
//!
//! # Examples
//!
//! ```bash
//! sleeplog start
//! sleeplog end
//! sleeplog summary --window 14
//! sleeplog history --since 2024-01-01 --format csv --output nights.csv
//! ```

pub mod clock;
pub mod config;
pub mod logbook;

#[cfg(feature = "cli")]
pub mod chart;
#[cfg(feature = "cli")]
pub mod cli;
#[cfg(feature = "cli")]
pub mod commands;
#[cfg(feature = "cli")]
pub mod format;
#[cfg(feature = "cli")]
pub mod style;
#[cfg(feature = "cli")]
pub mod util;

// TUI module - publicly exposed for the sleeplog-tui crate to use
#[cfg(feature = "tui")]
pub mod tui;

// Re-export core dependencies for convenience
pub use sleeplog_core;
pub use sleeplog_store;
pub use sleeplog_types;
