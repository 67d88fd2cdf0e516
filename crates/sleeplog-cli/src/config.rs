//! Configuration file management.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use sleeplog_core::{DEFAULT_RECENT_WINDOW, Threshold};

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "SLEEPLOG_CONFIG";

/// Configuration file structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Sleep log table path
    #[serde(default)]
    pub log_file: Option<PathBuf>,

    /// Insufficient-sleep threshold in hours
    #[serde(default)]
    pub threshold: Option<f64>,

    /// Number of records in the recent window
    #[serde(default)]
    pub window: Option<usize>,

    /// Disable colored output
    #[serde(default)]
    pub no_color: bool,

    /// Default output format
    #[serde(default)]
    pub format: Option<String>,
}

impl Config {
    /// Get the config file path
    pub fn path() -> PathBuf {
        if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
            return PathBuf::from(path);
        }
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("sleeplog")
            .join("config.toml")
    }

    /// Load config from file, or return default if not found
    pub fn load() -> Self {
        let path = Self::path();
        if path.exists() {
            match fs::read_to_string(&path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        eprintln!("Warning: Failed to parse config: {}", e);
                    }
                },
                Err(e) => {
                    eprintln!("Warning: Failed to read config: {}", e);
                }
            }
        }
        Self::default()
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let path = Self::path();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }
}

/// Resolve the table path: flag (or `SLEEPLOG_FILE`), then config, then default.
pub fn resolve_log_path(file: Option<PathBuf>, config: &Config) -> PathBuf {
    file.or_else(|| config.log_file.clone())
        .unwrap_or_else(sleeplog_store::default_log_path)
}

/// Resolve the threshold: flag, then config, then the default of 7 hours.
pub fn resolve_threshold(threshold: Option<f64>, config: &Config) -> Result<Threshold> {
    match threshold.or(config.threshold) {
        Some(hours) => match Threshold::new(hours) {
            Some(t) => Ok(t),
            None => bail!("Invalid threshold '{}': must be a positive number of hours", hours),
        },
        None => Ok(Threshold::default()),
    }
}

/// Resolve the recent-window size: flag, then config, then default.
pub fn resolve_window(window: Option<usize>, config: &Config) -> usize {
    window.or(config.window).unwrap_or(DEFAULT_RECENT_WINDOW)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_log_path_prefers_flag() {
        let config = Config {
            log_file: Some(PathBuf::from("config.csv")),
            ..Default::default()
        };
        let result = resolve_log_path(Some(PathBuf::from("flag.csv")), &config);
        assert_eq!(result, PathBuf::from("flag.csv"));
    }

    #[test]
    fn test_resolve_log_path_falls_back_to_config() {
        let config = Config {
            log_file: Some(PathBuf::from("config.csv")),
            ..Default::default()
        };
        assert_eq!(resolve_log_path(None, &config), PathBuf::from("config.csv"));
    }

    #[test]
    fn test_resolve_log_path_default() {
        assert_eq!(
            resolve_log_path(None, &Config::default()),
            PathBuf::from("sleep_log.csv")
        );
    }

    #[test]
    fn test_resolve_threshold() {
        let config = Config {
            threshold: Some(8.0),
            ..Default::default()
        };
        assert_eq!(resolve_threshold(Some(6.5), &config).unwrap().hours(), 6.5);
        assert_eq!(resolve_threshold(None, &config).unwrap().hours(), 8.0);
        assert_eq!(
            resolve_threshold(None, &Config::default()).unwrap().hours(),
            7.0
        );
        assert!(resolve_threshold(Some(-1.0), &config).is_err());
    }

    #[test]
    fn test_resolve_window() {
        let config = Config {
            window: Some(14),
            ..Default::default()
        };
        assert_eq!(resolve_window(Some(3), &config), 3);
        assert_eq!(resolve_window(None, &config), 14);
        assert_eq!(resolve_window(None, &Config::default()), 7);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config {
            log_file: Some(PathBuf::from("/tmp/nights.csv")),
            threshold: Some(7.5),
            window: None,
            no_color: true,
            format: Some("json".to_string()),
        };
        let toml_str = toml::to_string(&config).unwrap();
        assert!(toml_str.contains("threshold = 7.5"));
        assert!(toml_str.contains("no_color = true"));

        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_config_missing_keys_use_defaults() {
        let parsed: Config = toml::from_str("window = 10\n").unwrap();
        assert_eq!(parsed.window, Some(10));
        assert_eq!(parsed.threshold, None);
        assert!(!parsed.no_color);
    }
}
