//! Command implementations for the CLI.

mod cancel;
mod config;
mod end;
mod history;
mod start;
mod status;
mod summary;

pub use cancel::cmd_cancel;
pub use config::cmd_config;
pub use end::{NO_SESSION_MESSAGE, cmd_end};
pub use history::{HistoryArgs, build_query, cmd_history};
pub use start::cmd_start;
pub use status::cmd_status;
pub use summary::{SummaryArgs, cmd_summary};
