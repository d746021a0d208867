//! Theme provider configuration
//!
//! Every field is optional. A configuration can be built in code or loaded
//! from TOML:
//!
//! ```toml
//! mode = "auto"
//! persist_mode = true
//! storage_key = "my-app-theme"
//!
//! [theme.colors]
//! primary = "#ff5500"
//! ```

use crate::error::Result;
use crate::theme::{ThemeMode, ThemeOverride};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default key under which the mode selection is persisted
pub const DEFAULT_STORAGE_KEY: &str = "haspen-theme-mode";

/// Options recognized by a theme provider
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeProviderConfig {
    /// Initial mode selection
    pub mode: ThemeMode,
    /// Partial theme merged over the built-in theme
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<ThemeOverride>,
    /// Mark the root so theme changes animate
    pub enable_transitions: bool,
    /// Persist the mode selection across sessions
    pub persist_mode: bool,
    /// Storage key for the persisted selection
    pub storage_key: String,
}

impl Default for ThemeProviderConfig {
    fn default() -> Self {
        Self {
            mode: ThemeMode::Light,
            theme: None,
            enable_transitions: true,
            persist_mode: false,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

impl ThemeProviderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mut self, mode: ThemeMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_theme(mut self, theme: ThemeOverride) -> Self {
        self.theme = Some(theme);
        self
    }

    pub fn with_transitions(mut self, enabled: bool) -> Self {
        self.enable_transitions = enabled;
        self
    }

    /// Enable persistence under `storage_key`
    pub fn with_persistence(mut self, storage_key: impl Into<String>) -> Self {
        self.persist_mode = true;
        self.storage_key = storage_key.into();
        self
    }

    /// Parse a configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load a configuration from a TOML file
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}
