//! Command implementations
//!
//! Each command renders into a `String` so `main` owns all printing.

use anyhow::{Context, Result};
use haspen_core::ContextScope;
use haspen_theme::{
    render_css, use_theme, FileStorage, ModeStorage, Theme, ThemeEnvironment, ThemeMode,
    ThemeProvider, ThemeProviderConfig,
};
use std::path::Path;
use std::sync::Arc;

/// Output format for `haspen tokens`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum TokenFormat {
    #[default]
    Json,
    Toml,
}

/// Mount a provider in a throwaway scope and return its resolved theme
pub fn resolve(config: &ThemeProviderConfig, env: ThemeEnvironment) -> Arc<Theme> {
    let app = ContextScope::root();
    let provider = ThemeProvider::mount(&app, config.clone(), env);
    let theme = use_theme(provider.scope()).theme();
    tracing::info!(
        mode = %provider.context().mode(),
        scheme = %theme.mode,
        "resolved theme"
    );
    theme
}

/// `haspen css`
pub fn css(config: &ThemeProviderConfig, env: ThemeEnvironment, selector: &str) -> String {
    render_css(&resolve(config, env), selector)
}

/// `haspen tokens`
pub fn tokens(
    config: &ThemeProviderConfig,
    env: ThemeEnvironment,
    format: TokenFormat,
) -> Result<String> {
    let theme = resolve(config, env);
    match format {
        TokenFormat::Json => {
            serde_json::to_string_pretty(&*theme).context("Failed to serialize theme as JSON")
        }
        TokenFormat::Toml => {
            toml::to_string_pretty(&*theme).context("Failed to serialize theme as TOML")
        }
    }
}

/// `haspen mode get`
pub fn mode_get(store: &Path, key: &str) -> Result<Option<ThemeMode>> {
    let storage = FileStorage::new(store);
    let Some(stored) = storage
        .read(key)
        .with_context(|| format!("Failed to read {}", store.display()))?
    else {
        return Ok(None);
    };

    let mode = stored
        .parse::<ThemeMode>()
        .with_context(|| format!("{} holds an invalid mode for {key:?}", store.display()))?;
    Ok(Some(mode))
}

/// `haspen mode set`
pub fn mode_set(store: &Path, key: &str, mode: ThemeMode) -> Result<()> {
    FileStorage::new(store)
        .write(key, mode.as_str())
        .with_context(|| format!("Failed to write {}", store.display()))?;
    tracing::info!(key, %mode, store = %store.display(), "stored theme mode");
    Ok(())
}
