//! Application configuration

use crate::nav::destination::TabId;
use serde::{Deserialize, Serialize};

/// Consecutive passphrase mismatches allowed before regeneration.
pub const DEFAULT_MAX_PASSPHRASE_ATTEMPTS: u32 = 3;

/// Host-supplied configuration for the application core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Consecutive passphrase mismatches before a fresh one is required
    pub max_passphrase_attempts: u32,
    /// Tab the shell opens on
    pub default_tab: TabId,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            max_passphrase_attempts: DEFAULT_MAX_PASSPHRASE_ATTEMPTS,
            default_tab: TabId::Home,
        }
    }
}

impl AppConfig {
    /// Parse a TOML config document. Absent keys take defaults.
    pub fn from_toml_str(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    /// Render the config as TOML.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
