use std::io;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use sleeplog_cli::cli::{Cli, Commands};
use sleeplog_cli::commands::{
    HistoryArgs, SummaryArgs, cmd_cancel, cmd_config, cmd_end, cmd_history, cmd_start,
    cmd_status, cmd_summary,
};
use sleeplog_cli::config::{Config, resolve_log_path, resolve_threshold, resolve_window};
use sleeplog_cli::format::FormatOptions;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Handle completions command early (before tracing init)
    if let Commands::Completions { shell } = cli.command {
        let mut cmd = Cli::command();
        clap_complete::generate(shell, &mut cmd, "sleeplog", &mut io::stdout());
        return Ok(());
    }

    // When quiet mode is enabled, suppress info-level logging
    let filter = if cli.quiet {
        EnvFilter::new("warn")
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let config = Config::load();
    let opts = FormatOptions::new(cli.no_color || config.no_color, cli.style)
        .with_compact(cli.compact);
    let log_path = resolve_log_path(cli.file.clone(), &config);
    let output = cli.output.as_ref();
    tracing::debug!("Using sleep log {}", log_path.display());

    match cli.command {
        Commands::Start { at } => cmd_start(&log_path, at.as_deref(), cli.json, output, &opts),
        Commands::End { at } => {
            let threshold = resolve_threshold(None, &config)?;
            cmd_end(&log_path, at.as_deref(), threshold, cli.json, output, &opts)
        }
        Commands::Cancel => cmd_cancel(&log_path, cli.json, output, &opts),
        Commands::Status => cmd_status(&log_path, cli.json, output, &opts),
        Commands::Summary {
            window,
            threshold,
            no_chart,
            output: output_args,
        } => {
            let opts = opts.with_no_header(output_args.no_header);
            cmd_summary(SummaryArgs {
                log_path: &log_path,
                window: resolve_window(window, &config),
                threshold: resolve_threshold(threshold, &config)?,
                show_chart: !no_chart,
                format: output_args.resolve_format(cli.json, config.format.as_deref()),
                output,
                opts: &opts,
            })
        }
        Commands::History {
            count,
            since,
            until,
            threshold,
            output: output_args,
        } => {
            let opts = opts.with_no_header(output_args.no_header);
            cmd_history(HistoryArgs {
                log_path: &log_path,
                count,
                since,
                until,
                threshold: resolve_threshold(threshold, &config)?,
                format: output_args.resolve_format(cli.json, config.format.as_deref()),
                output,
                opts: &opts,
            })
        }
        Commands::Config { action } => cmd_config(action, output, &opts),
        #[cfg(feature = "tui")]
        Commands::Tui => sleeplog_cli::tui::run(&log_path, &config),
        Commands::Completions { .. } => {
            // Already handled above
            unreachable!()
        }
    }
}
