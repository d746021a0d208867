//! Haspen configuration file handling

use anyhow::{Context, Result};
use haspen_theme::ThemeProviderConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up in a directory
pub const CONFIG_FILE: &str = "haspen.toml";

/// Top-level Haspen configuration (haspen.toml)
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct HaspenConfig {
    #[serde(default)]
    pub provider: ThemeProviderConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Export settings
#[derive(Debug, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Selector the CSS variables are declared under
    #[serde(default = "default_selector")]
    pub selector: String,
}

fn default_selector() -> String {
    ":root".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            selector: default_selector(),
        }
    }
}

impl HaspenConfig {
    /// Load configuration from a file, or from haspen.toml in a directory
    pub fn load_from(path: &Path) -> Result<Self> {
        let config_path = config_path(path);

        if !config_path.exists() {
            anyhow::bail!(
                "No {CONFIG_FILE} found at {}. Run `haspen init` to create one.",
                path.display()
            );
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        let config: HaspenConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        Ok(config)
    }

    /// Load the explicit config, else ./haspen.toml if present, else defaults
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load_from(path),
            None if Path::new(CONFIG_FILE).is_file() => Self::load_from(Path::new(CONFIG_FILE)),
            None => {
                tracing::debug!("no {CONFIG_FILE} found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}

fn config_path(path: &Path) -> PathBuf {
    if path.is_dir() {
        path.join(CONFIG_FILE)
    } else {
        path.to_path_buf()
    }
}

/// Write a default haspen.toml into `dir`
pub fn write_default_config(dir: &Path, force: bool) -> Result<PathBuf> {
    let config_path = dir.join(CONFIG_FILE);
    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Pass --force to overwrite it.",
            config_path.display()
        );
    }

    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    fs::write(&config_path, HaspenConfig::default().to_toml()?)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    Ok(config_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use haspen_theme::ThemeMode;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("haspen-cli-{name}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_defaults() {
        let config = HaspenConfig::default();
        assert_eq!(config.output.selector, ":root");
        assert_eq!(config.provider, ThemeProviderConfig::default());
    }

    #[test]
    fn test_parse_sections() {
        let config: HaspenConfig = toml::from_str(
            r##"
            [provider]
            mode = "dark"

            [provider.theme.colors]
            primary = "#ff5500"

            [output]
            selector = ".app"
            "##,
        )
        .unwrap();

        assert_eq!(config.provider.mode, ThemeMode::Dark);
        assert_eq!(config.output.selector, ".app");
        let colors = &config.provider.theme.as_ref().unwrap().colors;
        assert_eq!(colors.primary.as_deref(), Some("#ff5500"));
    }

    #[test]
    fn test_init_then_load() {
        let dir = scratch_dir("init");
        let path = write_default_config(&dir, false).unwrap();
        assert!(path.ends_with(CONFIG_FILE));

        let loaded = HaspenConfig::load_from(&dir).unwrap();
        assert_eq!(loaded.provider, ThemeProviderConfig::default());
        assert_eq!(loaded.output.selector, ":root");

        assert!(write_default_config(&dir, false).is_err());
        assert!(write_default_config(&dir, true).is_ok());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_config_mentions_init() {
        let dir = scratch_dir("missing");
        let err = HaspenConfig::load_from(&dir).unwrap_err();
        assert!(err.to_string().contains("haspen init"));
    }
}
