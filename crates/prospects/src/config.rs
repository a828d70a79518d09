//! Configuration management for prospects.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "prospects";

/// Default saved collection file name.
const DATA_FILE_NAME: &str = "SavedProspects.json";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `PROSPECTS_`, nested with `__`)
/// 2. TOML config file at `~/.config/prospects/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Reminder configuration.
    pub reminders: ReminderConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the saved collection.
    /// Defaults to `~/.local/share/prospects/SavedProspects.json`
    pub data_path: Option<PathBuf>,
}

/// Reminder-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReminderConfig {
    /// Seconds between scheduling a reminder and it firing.
    pub delay_secs: u64,
    /// Whether the local scheduler grants notification permission when asked.
    pub allow_notifications: bool,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            delay_secs: 5,
            allow_notifications: true,
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("PROSPECTS_").split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.reminders.delay_secs == 0 {
            return Err(Error::ConfigValidation {
                message: "reminders.delay_secs must be greater than 0".to_string(),
            });
        }

        if let Some(path) = &self.storage.data_path {
            if path.as_os_str().is_empty() {
                return Err(Error::ConfigValidation {
                    message: "storage.data_path cannot be empty".to_string(),
                });
            }
        }

        Ok(())
    }

    /// Get the saved collection path, resolving defaults if not set.
    #[must_use]
    pub fn data_path(&self) -> PathBuf {
        self.storage
            .data_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(DATA_FILE_NAME))
    }

    /// Get the reminder delay as a Duration.
    #[must_use]
    pub fn reminder_delay(&self) -> Duration {
        Duration::from_secs(self.reminders.delay_secs)
    }
}
