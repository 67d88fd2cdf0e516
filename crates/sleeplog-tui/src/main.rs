use std::path::PathBuf;

use anyhow::Result;

use sleeplog_cli::config::{Config, resolve_log_path};

fn main() -> Result<()> {
    let config = Config::load();
    let file = std::env::var_os("SLEEPLOG_FILE")
        .filter(|p| !p.is_empty())
        .map(PathBuf::from);
    let log_path = resolve_log_path(file, &config);

    sleeplog_cli::tui::run(&log_path, &config)
}
