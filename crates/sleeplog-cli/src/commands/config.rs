//! Config command implementation.

use std::path::PathBuf;

use anyhow::{Result, bail};

use sleeplog_core::{DEFAULT_RECENT_WINDOW, DEFAULT_THRESHOLD_HOURS, Threshold};
use sleeplog_types::format::format_hours;

use crate::cli::{ConfigAction, ConfigKey, OutputFormat};
use crate::config::Config;
use crate::format::FormatOptions;
use crate::style;
use crate::util::write_output;

pub fn cmd_config(
    action: ConfigAction,
    output: Option<&PathBuf>,
    opts: &FormatOptions,
) -> Result<()> {
    let content = match action {
        ConfigAction::Path => format!("{}\n", Config::path().display()),
        ConfigAction::Show => {
            let config = Config::load();
            let body = toml::to_string_pretty(&config)?;
            if body.trim().is_empty() {
                format!(
                    "{}\n",
                    style::format_info("No configuration values set", opts.no_color)
                )
            } else {
                body
            }
        }
        ConfigAction::Get { key } => {
            let config = Config::load();
            match get_value(&config, key) {
                Some(value) => format!("{}\n", value),
                None => format!(
                    "{}\n",
                    style::format_info(
                        &format!("{} is not set", key_name(key)),
                        opts.no_color
                    )
                ),
            }
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load();
            set_value(&mut config, key, &value)?;
            config.save()?;
            tracing::info!("Set {} = {}", key_name(key), value);
            format!(
                "{}\n",
                style::format_success(
                    &format!("Set {} = {}", key_name(key), value),
                    opts.no_color
                )
            )
        }
        ConfigAction::Unset { key } => {
            let mut config = Config::load();
            unset_value(&mut config, key);
            config.save()?;
            format!(
                "{}\n",
                style::format_success(&format!("Unset {}", key_name(key)), opts.no_color)
            )
        }
        ConfigAction::Init => {
            let path = Config::path();
            if path.exists() {
                format!(
                    "{}\n",
                    style::format_info(
                        &format!("Config already exists at {}", path.display()),
                        opts.no_color
                    )
                )
            } else {
                let config = Config {
                    threshold: Some(DEFAULT_THRESHOLD_HOURS),
                    window: Some(DEFAULT_RECENT_WINDOW),
                    ..Config::default()
                };
                config.save()?;
                format!(
                    "{}\n",
                    style::format_success(
                        &format!("Created config at {}", path.display()),
                        opts.no_color
                    )
                )
            }
        }
    };
    write_output(output, &content)
}

/// Key name as written in the config file.
fn key_name(key: ConfigKey) -> &'static str {
    match key {
        ConfigKey::LogFile => "log_file",
        ConfigKey::Threshold => "threshold",
        ConfigKey::Window => "window",
        ConfigKey::NoColor => "no_color",
        ConfigKey::Format => "format",
    }
}

fn get_value(config: &Config, key: ConfigKey) -> Option<String> {
    match key {
        ConfigKey::LogFile => config.log_file.as_ref().map(|p| p.display().to_string()),
        ConfigKey::Threshold => config.threshold.map(format_hours),
        ConfigKey::Window => config.window.map(|w| w.to_string()),
        ConfigKey::NoColor => Some(config.no_color.to_string()),
        ConfigKey::Format => config.format.clone(),
    }
}

fn set_value(config: &mut Config, key: ConfigKey, value: &str) -> Result<()> {
    match key {
        ConfigKey::LogFile => {
            if value.trim().is_empty() {
                bail!("log_file must not be empty");
            }
            config.log_file = Some(PathBuf::from(value));
        }
        ConfigKey::Threshold => {
            let hours = value.trim().parse::<f64>().ok().and_then(Threshold::new);
            match hours {
                Some(threshold) => config.threshold = Some(threshold.hours()),
                None => bail!(
                    "Invalid threshold '{}': must be a positive number of hours",
                    value
                ),
            }
        }
        ConfigKey::Window => match value.trim().parse::<usize>() {
            Ok(window) if window > 0 => config.window = Some(window),
            _ => bail!("Invalid window '{}': must be a positive whole number", value),
        },
        ConfigKey::NoColor => {
            config.no_color = parse_bool(value).map_err(anyhow::Error::msg)?;
        }
        ConfigKey::Format => match OutputFormat::from_config(value) {
            Some(format) => {
                config.format = Some(format_name(format).to_string());
            }
            None => bail!("Invalid format '{}'. Valid values: text, json, csv", value),
        },
    }
    Ok(())
}

fn unset_value(config: &mut Config, key: ConfigKey) {
    match key {
        ConfigKey::LogFile => config.log_file = None,
        ConfigKey::Threshold => config.threshold = None,
        ConfigKey::Window => config.window = None,
        ConfigKey::NoColor => config.no_color = false,
        ConfigKey::Format => config.format = None,
    }
}

fn format_name(format: OutputFormat) -> &'static str {
    match format {
        OutputFormat::Text => "text",
        OutputFormat::Json => "json",
        OutputFormat::Csv => "csv",
    }
}

/// Parse boolean argument with flexible input
fn parse_bool(s: &str) -> Result<bool, String> {
    match s.trim().to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" | "enable" | "enabled" => Ok(true),
        "false" | "no" | "off" | "0" | "disable" | "disabled" => Ok(false),
        _ => Err(format!(
            "Invalid boolean value '{}'. Use: true/false, yes/no, on/off, 1/0",
            s
        )),
    }
}
