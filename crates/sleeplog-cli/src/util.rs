//! Utility functions for CLI operations.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use time::{Date, PrimitiveDateTime};

use sleeplog_types::format::{parse_date, parse_timestamp};

use crate::clock::local_now;

/// The instant to record: `--at` when given, otherwise the local time now.
pub fn resolve_instant(at: Option<&str>) -> Result<PrimitiveDateTime> {
    match at {
        Some(s) => parse_timestamp(s).with_context(|| {
            format!(
                "Invalid timestamp '{}'. Use YYYY-MM-DDTHH:MM[:SS] or YYYY-MM-DD HH:MM[:SS]",
                s
            )
        }),
        None => local_now(),
    }
}

/// Parse an optional `YYYY-MM-DD` filter argument.
pub fn parse_date_arg(value: Option<&str>) -> Result<Option<Date>> {
    value
        .map(|s| {
            parse_date(s)
                .with_context(|| format!("Invalid date '{}'. Use YYYY-MM-DD", s))
        })
        .transpose()
}

/// Write output to file or stdout.
pub fn write_output(output: Option<&PathBuf>, content: &str) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write to {}", path.display()))?;
        }
        None => {
            print!("{}", content);
            io::stdout().flush()?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    #[test]
    fn test_resolve_instant_parses_at() {
        assert_eq!(
            resolve_instant(Some("2024-01-01T23:00")).unwrap(),
            datetime!(2024-01-01 23:00:00)
        );
        assert_eq!(
            resolve_instant(Some("2024-01-02 06:30:15")).unwrap(),
            datetime!(2024-01-02 6:30:15)
        );
    }

    #[test]
    fn test_resolve_instant_rejects_garbage() {
        let err = resolve_instant(Some("last night")).unwrap_err();
        assert!(err.to_string().contains("last night"));
    }

    #[test]
    fn test_resolve_instant_defaults_to_now() {
        assert!(resolve_instant(None).is_ok());
    }

    #[test]
    fn test_parse_date_arg() {
        assert_eq!(parse_date_arg(None).unwrap(), None);
        assert_eq!(
            parse_date_arg(Some("2024-01-05")).unwrap(),
            Some(date!(2024 - 01 - 05))
        );
        assert!(parse_date_arg(Some("01/05/2024")).is_err());
    }

    #[test]
    fn test_write_output_to_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("out.csv");
        write_output(Some(&path), "date,start,end,hours\n").unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "date,start,end,hours\n"
        );
    }
}
