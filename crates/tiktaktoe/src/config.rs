//! Driver configuration loaded from TOML.

use std::path::{Path, PathBuf};

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Settings for the terminal driver.
///
/// Every field has a default, so an empty or missing file is valid.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_", into)]
pub struct DriverConfig {
    /// JSON file holding the all-time leaderboard.
    #[serde(default = "default_leaderboard_path")]
    leaderboard_path: PathBuf,

    /// Entries shown on the leaderboard screen.
    #[serde(default = "default_leaderboard_size")]
    leaderboard_size: usize,

    /// Pause before a computer move, in milliseconds.
    #[serde(default = "default_computer_delay_ms")]
    computer_delay_ms: u64,

    /// Log file used while the terminal UI owns the screen.
    #[serde(default = "default_log_file")]
    log_file: PathBuf,
}

fn default_leaderboard_path() -> PathBuf {
    PathBuf::from("resources/leaderboard.json")
}

fn default_leaderboard_size() -> usize {
    5
}

fn default_computer_delay_ms() -> u64 {
    400
}

fn default_log_file() -> PathBuf {
    PathBuf::from("tiktaktoe.log")
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            leaderboard_path: default_leaderboard_path(),
            leaderboard_size: default_leaderboard_size(),
            computer_delay_ms: default_computer_delay_ms(),
            log_file: default_log_file(),
        }
    }
}

impl DriverConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        Self::from_toml(&content)
    }

    /// Parses configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        if config.leaderboard_size == 0 {
            return Err(ConfigError::new("leaderboard_size must be at least 1"));
        }
        Ok(config)
    }

    /// Loads the file if it exists, otherwise returns defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            let config = Self::from_file(path)?;
            info!(?config, "Config loaded");
            Ok(config)
        } else {
            debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config = DriverConfig::from_toml("").unwrap();
        assert_eq!(config, DriverConfig::default());
        assert_eq!(
            config.leaderboard_path(),
            &PathBuf::from("resources/leaderboard.json")
        );
        assert_eq!(*config.leaderboard_size(), 5);
    }

    #[test]
    fn test_partial_toml_overrides() {
        let config = DriverConfig::from_toml("computer_delay_ms = 0\nleaderboard_size = 10\n").unwrap();
        assert_eq!(*config.computer_delay_ms(), 0);
        assert_eq!(*config.leaderboard_size(), 10);
        assert_eq!(config.log_file(), &PathBuf::from("tiktaktoe.log"));
    }

    #[test]
    fn test_zero_leaderboard_size_rejected() {
        let err = DriverConfig::from_toml("leaderboard_size = 0").unwrap_err();
        assert!(err.message.contains("leaderboard_size"));
    }

    #[test]
    fn test_bad_toml_rejected() {
        assert!(DriverConfig::from_toml("leaderboard_size = \"many\"").is_err());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = DriverConfig::load_or_default("/nonexistent/tiktaktoe.toml").unwrap();
        assert_eq!(config, DriverConfig::default());
    }

    #[test]
    fn test_setters() {
        let config = DriverConfig::default().with_leaderboard_path("scores.json");
        assert_eq!(config.leaderboard_path(), &PathBuf::from("scores.json"));
    }
}
