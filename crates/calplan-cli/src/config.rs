//! CLI configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/calplan/config.toml` by default. Every section is optional.

use std::path::{Path, PathBuf};

use calplan_core::ViewMode;
use serde::{Deserialize, Serialize};

use crate::error::{CliError, CliResult};
use crate::notify::DesktopConfig;

/// Configuration for the calplan CLI.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalplanConfig {
    /// Debug mode.
    pub debug: bool,

    /// Event store settings.
    pub store: StoreSettings,

    /// Calendar view settings.
    pub view: ViewSettings,

    /// Notification watcher settings.
    pub notifications: NotificationSettings,
}

/// Where events are kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    /// Path to the events JSON file. Defaults to the user data directory.
    pub path: Option<PathBuf>,
}

/// Calendar view settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewSettings {
    /// View used when `--view` is not given.
    pub default: ViewMode,
}

/// Notification watcher settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationSettings {
    /// Seconds between checks for due events.
    pub tick_secs: u64,

    /// Also show reminders as desktop notifications.
    pub desktop: bool,

    /// How long a desktop notification stays up, in seconds.
    pub desktop_timeout_secs: u32,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            tick_secs: 1,
            desktop: false,
            desktop_timeout_secs: 10,
        }
    }
}

impl NotificationSettings {
    /// Desktop notifier settings derived from this section.
    pub fn desktop_config(&self) -> DesktopConfig {
        DesktopConfig {
            timeout_secs: self.desktop_timeout_secs,
            ..DesktopConfig::default()
        }
    }
}

impl CalplanConfig {
    /// Loads configuration from the default path, or defaults if it does not exist.
    pub fn load() -> CliResult<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> CliResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| CliError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| CliError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Checks values that parse but cannot be used.
    pub fn validate(&self) -> CliResult<()> {
        if self.notifications.tick_secs == 0 {
            return Err(CliError::Config(
                "notifications.tick_secs must be at least 1".to_string(),
            ));
        }
        if let Some(ref path) = self.store.path {
            if path.as_os_str().is_empty() {
                return Err(CliError::Config("store.path must not be empty".to_string()));
            }
        }
        Ok(())
    }

    /// The events file to use: the configured path or the default one.
    pub fn store_path(&self) -> PathBuf {
        self.store
            .path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join("events.json"))
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("calplan")
    }

    /// Returns the default data directory path.
    pub fn default_data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("calplan")
    }
}
