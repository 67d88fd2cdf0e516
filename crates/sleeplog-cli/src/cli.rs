//! CLI argument definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Output format for commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

impl OutputFormat {
    /// Parse a format name as stored in the config file.
    pub fn from_config(value: &str) -> Option<Self> {
        Self::from_str(value, true).ok()
    }
}

/// Visual styling mode for output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum StyleMode {
    /// Standard styling with colors
    Minimal,
    /// Rich styling with tables, icons, and full formatting (default)
    #[default]
    Rich,
    /// Plain text with no decorations (for scripting)
    Plain,
}

/// Reusable output format arguments
#[derive(Debug, Clone, Args)]
pub struct OutputArgs {
    /// Output format (defaults to the config value, then text)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Omit header row in CSV output (useful for appending)
    #[arg(long)]
    pub no_header: bool,
}

impl OutputArgs {
    /// Resolve the format: `--json`, then `--format`, then config, then text.
    pub fn resolve_format(&self, json: bool, config_format: Option<&str>) -> OutputFormat {
        if json {
            OutputFormat::Json
        } else {
            self.format
                .or_else(|| config_format.and_then(OutputFormat::from_config))
                .unwrap_or_default()
        }
    }
}

#[derive(Parser)]
#[command(name = "sleeplog")]
#[command(author, version, about = "Log sleep sessions and review your sleep history", long_about = None)]
pub struct Cli {
    /// Sleep log CSV file (defaults to the config value, then ./sleep_log.csv)
    #[arg(short, long, global = true, env = "SLEEPLOG_FILE")]
    pub file: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output as JSON (shorthand for --format json)
    #[arg(long, global = true)]
    pub json: bool,

    /// Output compact JSON (no pretty-printing)
    #[arg(long, global = true)]
    pub compact: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Visual styling mode (minimal, rich, plain)
    #[arg(
        long,
        global = true,
        value_enum,
        default_value = "rich",
        env = "SLEEPLOG_STYLE"
    )]
    pub style: StyleMode,

    /// Write output to file instead of stdout
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start a sleep session
    #[command(alias = "begin")]
    Start {
        /// Record this instant instead of now (YYYY-MM-DDTHH:MM[:SS])
        #[arg(long)]
        at: Option<String>,
    },

    /// End the sleep session and record it
    #[command(alias = "wake")]
    End {
        /// Record this instant instead of now (YYYY-MM-DDTHH:MM[:SS])
        #[arg(long)]
        at: Option<String>,
    },

    /// Discard the open sleep session without recording it
    Cancel,

    /// Show whether a sleep session is open
    Status,

    /// Show recent records, the average and a trend chart
    #[command(alias = "stats")]
    Summary {
        /// Number of recent records to show
        #[arg(short = 'n', long)]
        window: Option<usize>,

        /// Insufficient-sleep threshold in hours
        #[arg(short, long)]
        threshold: Option<f64>,

        /// Hide the trend chart
        #[arg(long)]
        no_chart: bool,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// List stored sleep records
    History {
        /// Number of most recent records to show (0 for all)
        #[arg(short, long, default_value = "0")]
        count: usize,

        /// Only records dated on or after this day (YYYY-MM-DD)
        #[arg(long)]
        since: Option<String>,

        /// Only records dated on or before this day (YYYY-MM-DD)
        #[arg(long)]
        until: Option<String>,

        /// Insufficient-sleep threshold in hours (for highlighting)
        #[arg(short, long)]
        threshold: Option<f64>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },

    /// Launch interactive terminal dashboard
    #[cfg(feature = "tui")]
    Tui,
}

/// Configuration keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConfigKey {
    /// Sleep log CSV file
    LogFile,
    /// Insufficient-sleep threshold in hours
    Threshold,
    /// Number of records in the recent window
    Window,
    /// Disable colored output
    NoColor,
    /// Default output format
    Format,
}

/// Configuration subcommands
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Get a configuration value
    Get {
        /// Configuration key
        #[arg(value_enum)]
        key: ConfigKey,
    },

    /// Set a configuration value
    Set {
        /// Configuration key
        #[arg(value_enum)]
        key: ConfigKey,
        /// Configuration value
        value: String,
    },

    /// Unset (remove) a configuration value
    Unset {
        /// Configuration key to remove
        #[arg(value_enum)]
        key: ConfigKey,
    },

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_start_with_at() {
        let cli = Cli::try_parse_from(["sleeplog", "start", "--at", "2024-01-01T23:00"]).unwrap();
        match cli.command {
            Commands::Start { at } => assert_eq!(at.as_deref(), Some("2024-01-01T23:00")),
            _ => panic!("expected start"),
        }
    }

    #[test]
    fn test_aliases() {
        assert!(matches!(
            Cli::try_parse_from(["sleeplog", "begin"]).unwrap().command,
            Commands::Start { .. }
        ));
        assert!(matches!(
            Cli::try_parse_from(["sleeplog", "wake"]).unwrap().command,
            Commands::End { .. }
        ));
        assert!(matches!(
            Cli::try_parse_from(["sleeplog", "stats"]).unwrap().command,
            Commands::Summary { .. }
        ));
    }

    #[test]
    fn test_global_file_flag_after_subcommand() {
        let cli = Cli::try_parse_from(["sleeplog", "status", "--file", "nights.csv"]).unwrap();
        assert_eq!(cli.file, Some(PathBuf::from("nights.csv")));
    }

    #[test]
    fn test_resolve_format() {
        let args = OutputArgs {
            format: None,
            no_header: false,
        };
        assert_eq!(args.resolve_format(false, None), OutputFormat::Text);
        assert_eq!(args.resolve_format(false, Some("csv")), OutputFormat::Csv);
        assert_eq!(args.resolve_format(false, Some("bogus")), OutputFormat::Text);
        assert_eq!(args.resolve_format(true, Some("csv")), OutputFormat::Json);

        let args = OutputArgs {
            format: Some(OutputFormat::Csv),
            no_header: false,
        };
        assert_eq!(args.resolve_format(false, Some("json")), OutputFormat::Csv);
    }
}
