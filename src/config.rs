//! Storage keys and store limits.
//!
//! Every field has a default, so an empty TOML document (or no file at all)
//! yields the keys the mobile client has always used.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::ConfigError;

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub keys: StorageKeys,
    pub notifications: NotificationSettings,
}

/// Storage key per persisted store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageKeys {
    pub theme: String,
    pub currency: String,
    pub favorites: String,
    pub notifications: String,
    pub onboarding: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            theme: "app_theme".to_string(),
            currency: "app_currency".to_string(),
            favorites: "favorites-storage".to_string(),
            notifications: "notification-storage".to_string(),
            onboarding: "hasCompletedOnboarding".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationSettings {
    /// Most-recent entries kept; older ones are evicted on insert.
    pub capacity: usize,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self { capacity: 100 }
    }
}

impl Config {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config =
            toml::from_str(content).map_err(|source| ConfigError::ParseError { source })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from `path`.
    ///
    /// - If the file doesn't exist, returns `Config::default()`.
    /// - Otherwise parses it as TOML and validates it.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::from_toml_str(&content)
    }

    /// Check that keys are non-empty and distinct and the capacity is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let keys = [
            ("theme", &self.keys.theme),
            ("currency", &self.keys.currency),
            ("favorites", &self.keys.favorites),
            ("notifications", &self.keys.notifications),
            ("onboarding", &self.keys.onboarding),
        ];

        let mut seen = HashSet::new();
        for (name, key) in keys {
            if key.trim().is_empty() {
                return Err(ConfigError::ValidationError {
                    message: format!("storage key for '{name}' is empty"),
                });
            }
            if !seen.insert(key.as_str()) {
                return Err(ConfigError::ValidationError {
                    message: format!("storage key '{key}' is used by more than one store"),
                });
            }
        }

        if self.notifications.capacity == 0 {
            return Err(ConfigError::ValidationError {
                message: "notification capacity must be at least 1".to_string(),
            });
        }

        Ok(())
    }
}
