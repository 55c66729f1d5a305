// Configuration loading

pub mod error;
pub mod messages;
pub mod settings;
pub mod store;
pub mod theme;

pub use error::ConfigError;
pub use messages::Messages;
pub use settings::{Settings, SettingsChange};
pub use store::{FileStore, MemoryStore, SettingsStore};
pub use theme::Theme;
