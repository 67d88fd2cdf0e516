//! Status command implementation.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::clock::local_now;
use crate::format::{FormatOptions, format_status_json, format_status_text};
use crate::logbook::Logbook;
use crate::util::write_output;

pub fn cmd_status(
    log_path: &Path,
    json: bool,
    output: Option<&PathBuf>,
    opts: &FormatOptions,
) -> Result<()> {
    let logbook = Logbook::open(log_path)?;
    let status = logbook.tracker().status();
    let now = local_now()?;

    let content = if json {
        format_status_json(&status, now, opts)?
    } else {
        format_status_text(&status, now, opts)
    };
    write_output(output, &content)
}
