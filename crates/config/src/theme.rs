// Theme preference
// The core never interprets it; hosts map it onto their own styling.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    /// Follow the host's light/dark preference. Also used for unknown values.
    #[default]
    #[serde(other)]
    Auto,
}

impl Theme {
    /// Attribute value hosts stamp onto their root element.
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Auto => "auto",
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}
