// Selection settings
// Loaded from ~/.config/selstat/settings.json

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::theme::Theme;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Master switch. When off, no input is handled.
    pub enabled: bool,

    pub theme: Theme,

    /// Suppress the host's native text selection while a drag is in progress.
    pub override_selection: bool,

    /// Ctrl/Cmd+C copies the selected cells as TSV.
    pub smart_copy: bool,

    /// Only bare numbers count (no currency symbols, no thousands separators).
    pub strict_mode: bool,

    /// BCP 47 tag used to format the statistics.
    pub locale: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enabled: true,
            theme: Theme::Auto,
            override_selection: true,
            smart_copy: true,
            strict_mode: false,
            locale: "en-US".to_string(),
        }
    }
}

/// Which fields differ between two settings snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SettingsChange {
    pub enabled: bool,
    pub theme: bool,
    pub override_selection: bool,
    pub smart_copy: bool,
    pub strict_mode: bool,
    pub locale: bool,
}

impl SettingsChange {
    pub fn is_empty(&self) -> bool {
        *self == SettingsChange::default()
    }
}

impl Settings {
    pub fn diff(old: &Settings, new: &Settings) -> SettingsChange {
        SettingsChange {
            enabled: old.enabled != new.enabled,
            theme: old.theme != new.theme,
            override_selection: old.override_selection != new.override_selection,
            smart_copy: old.smart_copy != new.smart_copy,
            strict_mode: old.strict_mode != new.strict_mode,
            locale: old.locale != new.locale,
        }
    }

    /// Get the settings file path
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("selstat")
            .join("settings.json")
    }

    /// Load settings from the default path, falling back to defaults
    pub fn load() -> Self {
        let path = Self::config_path();
        if !path.exists() {
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("{}; using default settings", e);
                Self::default()
            }
        }
    }

    /// Load settings from a file. Lines starting with `//` are comments.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let cleaned: String = contents
            .lines()
            .filter(|line| !line.trim().starts_with("//"))
            .collect::<Vec<_>>()
            .join("\n");

        serde_json::from_str(&cleaned).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Save settings to a file, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Save current settings to the default path
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path())
    }
}
