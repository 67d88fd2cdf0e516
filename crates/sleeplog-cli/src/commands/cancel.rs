//! Cancel command implementation.

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Serialize;

use sleeplog_types::format::format_timestamp;

use crate::format::FormatOptions;
use crate::logbook::Logbook;
use crate::style;
use crate::util::write_output;

pub fn cmd_cancel(
    log_path: &Path,
    json: bool,
    output: Option<&PathBuf>,
    opts: &FormatOptions,
) -> Result<()> {
    let mut logbook = Logbook::open(log_path)?;
    let discarded = logbook.cancel()?;

    let content = if json {
        #[derive(Serialize)]
        struct CancelJson {
            cancelled: bool,
            #[serde(skip_serializing_if = "Option::is_none")]
            started_at: Option<String>,
        }
        opts.as_json(&CancelJson {
            cancelled: discarded.is_some(),
            started_at: discarded.map(format_timestamp),
        })?
    } else {
        let line = match discarded {
            Some(start) => style::format_success(
                &format!(
                    "Discarded sleep session started at {}",
                    format_timestamp(start).replace('T', " ")
                ),
                opts.no_color,
            ),
            None => style::format_info("No sleep session in progress", opts.no_color),
        };
        format!("{}\n", line)
    };
    write_output(output, &content)
}
