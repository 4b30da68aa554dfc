//! Application settings persisted as JSON
//!
//! Loaded once at startup and written back whenever the GUI changes a value
//! (currently only the theme). Missing fields take their defaults so older
//! files keep loading.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::constants::validation::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    Light,
    Dark,
    #[default]
    System,
}

impl ThemePreference {
    pub const ALL: [ThemePreference; 3] =
        [ThemePreference::Light, ThemePreference::Dark, ThemePreference::System];

    pub fn label(self) -> &'static str {
        match self {
            ThemePreference::Light => "Light",
            ThemePreference::Dark => "Dark",
            ThemePreference::System => "System",
        }
    }
}

/// Window geometry restored at launch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowSettings {
    #[serde(default = "default_window_width")]
    pub width: u16,
    #[serde(default = "default_window_height")]
    pub height: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub window: WindowSettings,
    #[serde(default)]
    pub theme: ThemePreference,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Start the tour after login while it has never been finished or skipped
    #[serde(default = "default_auto_start_tour")]
    pub auto_start_tour: bool,
    /// Optional JSON step catalog replacing the built-in tour
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tour_file: Option<PathBuf>,
}

fn default_window_width() -> u16 {
    1200
}

fn default_window_height() -> u16 {
    860
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_auto_start_tour() -> bool {
    true
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            width: default_window_width(),
            height: default_window_height(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window: WindowSettings::default(),
            theme: ThemePreference::default(),
            log_level: default_log_level(),
            auto_start_tour: default_auto_start_tour(),
            tour_file: None,
        }
    }
}

impl AppConfig {
    pub fn default_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(crate::constants::config::APP_DIR);
        path.push(crate::constants::config::FILENAME);
        path
    }

    /// Load configuration from JSON file or create default
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("Config file not found, creating default config at {:?}", path);
            let config = AppConfig::default();
            config.save(path)?;
            return Ok(config);
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        let mut config: AppConfig = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse JSON from {:?}", path))?;
        config.validate_and_clamp();

        info!(theme = ?config.theme, auto_start_tour = config.auto_start_tour, "Loaded config");
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        let json = serde_json::to_string_pretty(self).context("Failed to serialize config to JSON")?;

        fs::write(path, json).with_context(|| format!("Failed to write config to {:?}", path))?;

        info!("Saved config to {:?}", path);
        Ok(())
    }

    /// Clamp out-of-range values to safe limits
    fn validate_and_clamp(&mut self) {
        if self.window.width < MIN_WINDOW_WIDTH {
            warn!(width = self.window.width, min = MIN_WINDOW_WIDTH, "window width below minimum, clamping");
            self.window.width = MIN_WINDOW_WIDTH;
        } else if self.window.width > MAX_WINDOW_WIDTH {
            warn!(width = self.window.width, max = MAX_WINDOW_WIDTH, "window width exceeds maximum, clamping");
            self.window.width = MAX_WINDOW_WIDTH;
        }

        if self.window.height < MIN_WINDOW_HEIGHT {
            warn!(height = self.window.height, min = MIN_WINDOW_HEIGHT, "window height below minimum, clamping");
            self.window.height = MIN_WINDOW_HEIGHT;
        } else if self.window.height > MAX_WINDOW_HEIGHT {
            warn!(height = self.window.height, max = MAX_WINDOW_HEIGHT, "window height exceeds maximum, clamping");
            self.window.height = MAX_WINDOW_HEIGHT;
        }

        let level = self.log_level.to_lowercase();
        if !matches!(level.as_str(), "trace" | "debug" | "info" | "warn" | "error") {
            warn!(log_level = %self.log_level, "Unknown log_level, using info");
            self.log_level = default_log_level();
        } else {
            self.log_level = level;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_creates_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orbit").join("config.json");

        let config = AppConfig::load(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.theme, ThemePreference::System);
        assert!(config.auto_start_tour);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"theme": "dark"}"#).unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.theme, ThemePreference::Dark);
        assert_eq!(config.window.width, 1200);
        assert!(config.tour_file.is_none());
    }

    #[test]
    fn test_save_then_load_keeps_theme() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = AppConfig::default();
        config.theme = ThemePreference::Light;
        config.auto_start_tour = false;
        config.save(&path).unwrap();

        let loaded = AppConfig::load(&path).unwrap();
        assert_eq!(loaded.theme, ThemePreference::Light);
        assert!(!loaded.auto_start_tour);
    }

    #[test]
    fn test_invalid_json_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ theme: ").unwrap();

        assert!(AppConfig::load(&path).is_err());
    }

    #[test]
    fn test_clamps_window_and_log_level() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{"window": {"width": 10, "height": 60000}, "log_level": "LOUD"}"#,
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.window.width, MIN_WINDOW_WIDTH);
        assert_eq!(config.window.height, MAX_WINDOW_HEIGHT);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_log_level_normalized_to_lowercase() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"log_level": "DEBUG"}"#).unwrap();

        assert_eq!(AppConfig::load(&path).unwrap().log_level, "debug");
    }
}
