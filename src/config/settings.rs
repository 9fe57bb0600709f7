//! User settings persisted between sessions.
//!
//! Two values survive restarts: gesture sensitivity and the color theme.
//! They live in their own `settings.toml` next to the main config so saving
//! them never rewrites the user's hand-edited configuration.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const MIN_SENSITIVITY: u8 = 1;
pub const MAX_SENSITIVITY: u8 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

impl ThemeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_sensitivity", rename = "gestureSensitivity")]
    pub gesture_sensitivity: u8,
    #[serde(default)]
    pub theme: ThemeMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            gesture_sensitivity: default_sensitivity(),
            theme: ThemeMode::Dark,
        }
    }
}

impl Settings {
    pub fn set_sensitivity(&mut self, value: i32) {
        self.gesture_sensitivity = value.clamp(MIN_SENSITIVITY as i32, MAX_SENSITIVITY as i32) as u8;
    }
}

fn default_sensitivity() -> u8 {
    5
}

/// File-backed settings storage.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored settings, or defaults when nothing has been saved yet.
    pub fn load(&self) -> Result<Settings> {
        if !self.path.exists() {
            return Ok(Settings::default());
        }
        let contents = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read settings from {}", self.path.display()))?;
        let mut settings: Settings =
            toml::from_str(&contents).with_context(|| "Failed to parse settings file")?;
        settings.set_sensitivity(settings.gesture_sensitivity as i32);
        Ok(settings)
    }

    pub fn save(&self, settings: &Settings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create settings directory {}", parent.display())
            })?;
        }
        let contents =
            toml::to_string_pretty(settings).with_context(|| "Failed to serialize settings")?;
        std::fs::write(&self.path, contents)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("settings.toml"));
        assert_eq!(store.load().unwrap(), Settings::default());
    }

    #[test]
    fn test_saved_settings_reload() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("nested").join("settings.toml"));
        let settings = Settings {
            gesture_sensitivity: 7,
            theme: ThemeMode::Light,
        };
        store.save(&settings).unwrap();
        assert_eq!(store.load().unwrap(), settings);
    }

    #[test]
    fn test_out_of_range_sensitivity_is_clamped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "gestureSensitivity = 40\ntheme = \"light\"\n").unwrap();
        let settings = SettingsStore::new(&path).load().unwrap();
        assert_eq!(settings.gesture_sensitivity, MAX_SENSITIVITY);
        assert_eq!(settings.theme, ThemeMode::Light);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "theme = \"purple\"").unwrap();
        assert!(SettingsStore::new(&path).load().is_err());
    }
}
