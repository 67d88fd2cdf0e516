//! Start command implementation.

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Serialize;

use sleeplog_types::format::{format_clock, format_timestamp};

use crate::format::FormatOptions;
use crate::logbook::{Began, Logbook};
use crate::style;
use crate::util::{resolve_instant, write_output};

pub fn cmd_start(
    log_path: &Path,
    at: Option<&str>,
    json: bool,
    output: Option<&PathBuf>,
    opts: &FormatOptions,
) -> Result<()> {
    let now = resolve_instant(at)?;
    let mut logbook = Logbook::open(log_path)?;
    let began = logbook.begin(now)?;

    let content = if json {
        format_start_json(&began, opts)?
    } else {
        format_start_text(&began, opts)
    };
    write_output(output, &content)
}

fn format_start_text(began: &Began, opts: &FormatOptions) -> String {
    let mut output = String::new();
    if let Some(previous) = began.replaced {
        output.push_str(&style::format_warning(
            &format!(
                "Sleep was already started at {}; starting over",
                format_timestamp(previous).replace('T', " ")
            ),
            opts.no_color,
        ));
        output.push('\n');
    }
    output.push_str(&style::format_success(
        &format!("Sleep started at {}", format_clock(began.started_at.time())),
        opts.no_color,
    ));
    output.push('\n');
    output
}

fn format_start_json(began: &Began, opts: &FormatOptions) -> Result<String> {
    #[derive(Serialize)]
    struct StartJson {
        started_at: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        replaced: Option<String>,
    }

    opts.as_json(&StartJson {
        started_at: format_timestamp(began.started_at),
        replaced: began.replaced.map(format_timestamp),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::StyleMode;
    use time::macros::datetime;

    #[test]
    fn test_format_start_text() {
        let opts = FormatOptions::new(true, StyleMode::Plain);
        let began = Began {
            started_at: datetime!(2024-01-01 23:00:00),
            replaced: None,
        };
        assert_eq!(
            format_start_text(&began, &opts),
            "[OK] Sleep started at 23:00:00\n"
        );
    }

    #[test]
    fn test_format_start_text_replaced() {
        let opts = FormatOptions::new(true, StyleMode::Plain);
        let began = Began {
            started_at: datetime!(2024-01-01 23:00:00),
            replaced: Some(datetime!(2024-01-01 22:00:00)),
        };
        let text = format_start_text(&began, &opts);
        assert!(text.starts_with("[!!] Sleep was already started at 2024-01-01 22:00:00"));
        assert!(text.ends_with("[OK] Sleep started at 23:00:00\n"));
    }

    #[test]
    fn test_format_start_json() {
        let opts = FormatOptions::default().with_compact(true);
        let began = Began {
            started_at: datetime!(2024-01-01 23:00:00),
            replaced: None,
        };
        assert_eq!(
            format_start_json(&began, &opts).unwrap(),
            "{\"started_at\":\"2024-01-01T23:00:00\"}\n"
        );
    }
}
