// Localized status bar strings
// Accepts either a flat {"sum": "Summe"} map or the browser-extension
// messages.json shape {"sum": {"message": "Summe"}}.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Messages {
    pub average: String,
    pub count: String,
    pub sum: String,
    pub copied: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            average: "Average".to_string(),
            count: "Count".to_string(),
            sum: "Sum".to_string(),
            copied: "Copied!".to_string(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Entry {
    Plain(String),
    Extension { message: String },
}

impl Entry {
    fn into_text(self) -> String {
        match self {
            Entry::Plain(s) => s,
            Entry::Extension { message } => message,
        }
    }
}

impl Messages {
    /// Build from key/value pairs. Unknown keys are ignored; missing or empty
    /// values keep the English default.
    pub fn from_map<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut messages = Self::default();
        for (key, value) in entries {
            let value = value.into();
            if value.is_empty() {
                continue;
            }
            match key.as_ref() {
                "average" => messages.average = value,
                "count" => messages.count = value,
                "sum" => messages.sum = value,
                "copied" => messages.copied = value,
                _ => {}
            }
        }
        messages
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let entries: HashMap<String, Entry> = serde_json::from_str(json)?;
        Ok(Self::from_map(entries.into_iter().map(|(k, v)| (k, v.into_text()))))
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_map() {
        let m = Messages::from_map([("sum", "Summe"), ("average", "Mittelwert"), ("bogus", "x")]);
        assert_eq!(m.sum, "Summe");
        assert_eq!(m.average, "Mittelwert");
        assert_eq!(m.count, "Count");
    }

    #[test]
    fn test_extension_shape() {
        let json = r#"{"count": {"message": "Anzahl", "description": "label"}, "copied": "Kopiert!"}"#;
        let m = Messages::from_json(json).unwrap();
        assert_eq!(m.count, "Anzahl");
        assert_eq!(m.copied, "Kopiert!");
        assert_eq!(m.sum, "Sum");
    }

    #[test]
    fn test_empty_value_keeps_default() {
        let m = Messages::from_map([("sum", "")]);
        assert_eq!(m.sum, "Sum");
    }
}
