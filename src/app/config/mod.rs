// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[general]` - Theme and the shared value's starting text
//! - `[notifications]` - Toast display duration, dispatch policy, click payload
//!
//! # Path Resolution
//!
//! See [`paths`](crate::app::paths): explicit override, then `ICED_TOASTS_CONFIG_DIR`, then the
//! platform config directory.
//!
//! # Examples
//!
//! ```no_run
//! use iced_toasts::app::config::{self, Config};
//!
//! // Load existing configuration (returns tuple with optional warning)
//! let (mut config, _warning) = config::load();
//!
//! // Modify a setting
//! config.notifications.display_duration_ms = 5000;
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::error::{Error, Result};
use crate::event_bus::DispatchPolicy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";

/// Warning shown as a toast when `settings.toml` exists but cannot be read.
pub const CONFIG_LOAD_WARNING: &str = "Settings could not be loaded; using defaults";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeMode {
    Light,
    #[default]
    Dark,
}

// =============================================================================
// Section Structs
// =============================================================================

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneralConfig {
    #[serde(default)]
    pub theme_mode: ThemeMode,

    /// Text the shared value starts with.
    #[serde(default = "default_initial_value")]
    pub initial_value: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            theme_mode: ThemeMode::default(),
            initial_value: default_initial_value(),
        }
    }
}

/// Toast notification settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NotificationsConfig {
    /// How long each toast stays visible, in milliseconds.
    #[serde(default = "default_display_duration_ms")]
    pub display_duration_ms: u64,

    /// What the event bus does when a subscriber fails.
    #[serde(default)]
    pub dispatch_policy: DispatchPolicy,

    /// Payload published by the button.
    #[serde(default = "default_click_message")]
    pub click_message: String,
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            display_duration_ms: DEFAULT_DISPLAY_DURATION_MS,
            dispatch_policy: DispatchPolicy::default(),
            click_message: default_click_message(),
        }
    }
}

impl NotificationsConfig {
    /// Display duration clamped to the supported range.
    #[must_use]
    pub fn display_duration(&self) -> Duration {
        Duration::from_millis(
            self.display_duration_ms
                .clamp(MIN_DISPLAY_DURATION_MS, MAX_DISPLAY_DURATION_MS),
        )
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Application configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub notifications: NotificationsConfig,
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_initial_value() -> String {
    DEFAULT_INITIAL_VALUE.to_string()
}

fn default_display_duration_ms() -> u64 {
    DEFAULT_DISPLAY_DURATION_MS
}

fn default_click_message() -> String {
    DEFAULT_CLICK_MESSAGE.to_string()
}

// =============================================================================
// Config Path Resolution
// =============================================================================

/// Returns the config file path with an optional override.
fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning message explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => {
                    log::debug!("loaded settings from {}", path.display());
                    return (config, None);
                }
                Err(err) => {
                    log::warn!("failed to load {}: {err}", path.display());
                    return (Config::default(), Some(CONFIG_LOAD_WARNING.to_string()));
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_settings() {
        let config = Config {
            general: GeneralConfig {
                theme_mode: ThemeMode::Light,
                initial_value: "Hello".to_string(),
            },
            notifications: NotificationsConfig {
                display_duration_ms: 1500,
                dispatch_policy: DispatchPolicy::Abort,
                click_message: "Clicked".to_string(),
            },
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_invalid_toml_errors() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        let result = load_from_path(&config_path);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(
            &config_path,
            "[notifications]\ndispatch_policy = \"abort\"\n",
        )
        .expect("failed to write config");

        let loaded = load_from_path(&config_path).expect("partial config should load");

        assert_eq!(loaded.notifications.dispatch_policy, DispatchPolicy::Abort);
        assert_eq!(
            loaded.notifications.display_duration_ms,
            DEFAULT_DISPLAY_DURATION_MS
        );
        assert_eq!(loaded.notifications.click_message, DEFAULT_CLICK_MESSAGE);
        assert_eq!(loaded.general, GeneralConfig::default());
    }

    #[test]
    fn load_with_override_returns_warning_on_invalid_file() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        fs::write(temp_dir.path().join(CONFIG_FILE), "[general\n").expect("write");

        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));

        assert_eq!(config, Config::default());
        assert_eq!(warning.as_deref(), Some(CONFIG_LOAD_WARNING));
    }

    #[test]
    fn load_with_override_without_file_is_silent() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));

        assert_eq!(config, Config::default());
        assert!(warning.is_none());
    }

    #[test]
    fn save_with_override_writes_settings_file() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        save_with_override(&Config::default(), Some(temp_dir.path().to_path_buf()))
            .expect("save should succeed");

        assert!(temp_dir.path().join(CONFIG_FILE).exists());
    }

    #[test]
    fn display_duration_is_clamped() {
        let mut notifications = NotificationsConfig::default();
        assert_eq!(
            notifications.display_duration(),
            Duration::from_millis(DEFAULT_DISPLAY_DURATION_MS)
        );

        notifications.display_duration_ms = 1;
        assert_eq!(
            notifications.display_duration(),
            Duration::from_millis(MIN_DISPLAY_DURATION_MS)
        );

        notifications.display_duration_ms = u64::MAX;
        assert_eq!(
            notifications.display_duration(),
            Duration::from_millis(MAX_DISPLAY_DURATION_MS)
        );
    }

    #[test]
    fn unknown_dispatch_policy_is_rejected() {
        let result = toml::from_str::<Config>("[notifications]\ndispatch_policy = \"retry\"\n");
        assert!(result.is_err());
    }
}
