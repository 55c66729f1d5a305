// Settings stores
// The engine only ever sees plain `Settings` values; stores are how hosts
// fetch them. A store that goes away must not take the engine with it.

use std::cell::RefCell;
use std::path::PathBuf;

use crate::error::ConfigError;
use crate::settings::Settings;

pub trait SettingsStore {
    fn load(&self) -> Result<Settings, ConfigError>;
    fn save(&self, settings: &Settings) -> Result<(), ConfigError>;
}

/// Load from a store, keeping `last_known` if the store cannot answer.
pub fn load_or(store: &dyn SettingsStore, last_known: &Settings) -> Settings {
    match store.load() {
        Ok(settings) => settings,
        Err(e) => {
            log::warn!("{}; keeping last known settings", e);
            last_known.clone()
        }
    }
}

/// JSON file on disk. A missing file reads as defaults.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the platform config location.
    pub fn default_location() -> Self {
        Self::new(Settings::config_path())
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl SettingsStore for FileStore {
    fn load(&self) -> Result<Settings, ConfigError> {
        if !self.path.exists() {
            return Ok(Settings::default());
        }
        Settings::load_from(&self.path)
    }

    fn save(&self, settings: &Settings) -> Result<(), ConfigError> {
        settings.save_to(&self.path)
    }
}

/// In-process store that can be switched off to simulate a vanished host.
#[derive(Debug)]
pub struct MemoryStore {
    settings: RefCell<Settings>,
    available: RefCell<bool>,
}

impl MemoryStore {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings: RefCell::new(settings),
            available: RefCell::new(true),
        }
    }

    pub fn set_available(&self, available: bool) {
        *self.available.borrow_mut() = available;
    }
}

impl SettingsStore for MemoryStore {
    fn load(&self) -> Result<Settings, ConfigError> {
        if !*self.available.borrow() {
            return Err(ConfigError::Unavailable("memory store offline".into()));
        }
        Ok(self.settings.borrow().clone())
    }

    fn save(&self, settings: &Settings) -> Result<(), ConfigError> {
        if !*self.available.borrow() {
            return Err(ConfigError::Unavailable("memory store offline".into()));
        }
        *self.settings.borrow_mut() = settings.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_store_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("absent.json"));
        assert_eq!(store.load().unwrap(), Settings::default());
    }

    #[test]
    fn test_file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("settings.json"));
        let s = Settings { smart_copy: false, ..Settings::default() };
        store.save(&s).unwrap();
        assert_eq!(store.load().unwrap(), s);
    }

    #[test]
    fn test_load_or_keeps_last_known_when_unavailable() {
        let store = MemoryStore::new(Settings::default());
        let last = Settings { strict_mode: true, ..Settings::default() };
        assert_eq!(load_or(&store, &last), Settings::default());

        store.set_available(false);
        assert_eq!(load_or(&store, &last), last);
        assert!(store.save(&last).is_err());
    }
}
