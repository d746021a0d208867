//! Mode resolution
//!
//! The user selects a [`ThemeMode`]; styling needs a [`ColorScheme`]. `Light`
//! and `Dark` map directly. `Auto` follows the system preference.
//!
//! At startup the selection comes from, in order: the persisted value (when
//! persistence is enabled and the stored literal is valid), then the
//! configured mode.

use crate::platform::SystemScheme;
use crate::storage::ModeStorage;
use crate::theme::{ColorScheme, ThemeMode};

/// Effective scheme for a selection
pub fn resolve_scheme(selection: ThemeMode, system: &dyn SystemScheme) -> ColorScheme {
    selection.fixed_scheme().unwrap_or_else(|| system.current())
}

/// Read the persisted selection, treating failures and invalid values as absent
pub fn read_persisted_mode(storage: &dyn ModeStorage, key: &str) -> Option<ThemeMode> {
    let stored = match storage.read(key) {
        Ok(stored) => stored?,
        Err(e) => {
            tracing::warn!(key, error = %e, "failed to read persisted theme mode");
            return None;
        }
    };

    match stored.parse::<ThemeMode>() {
        Ok(mode) => Some(mode),
        Err(_) => {
            tracing::debug!(key, value = %stored, "ignoring invalid persisted theme mode");
            None
        }
    }
}

/// Write the selection, logging and swallowing failures
///
/// Returns whether the write succeeded.
pub fn persist_mode(storage: &dyn ModeStorage, key: &str, mode: ThemeMode) -> bool {
    match storage.write(key, mode.as_str()) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(key, %mode, error = %e, "failed to persist theme mode");
            false
        }
    }
}

/// Initial selection for a provider
pub fn initial_mode(
    configured: ThemeMode,
    persist: bool,
    storage: Option<&dyn ModeStorage>,
    key: &str,
) -> ThemeMode {
    if !persist {
        return configured;
    }
    storage
        .and_then(|storage| read_persisted_mode(storage, key))
        .unwrap_or(configured)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{FixedScheme, ManualScheme};
    use crate::storage::{MemoryStorage, UnavailableStorage};

    #[test]
    fn test_fixed_modes_ignore_system() {
        let system = FixedScheme::dark();
        assert_eq!(resolve_scheme(ThemeMode::Light, &system), ColorScheme::Light);
        assert_eq!(resolve_scheme(ThemeMode::Dark, &system), ColorScheme::Dark);
    }

    #[test]
    fn test_auto_follows_system() {
        let system = ManualScheme::new(ColorScheme::Light);
        assert_eq!(resolve_scheme(ThemeMode::Auto, &system), ColorScheme::Light);
        system.set(ColorScheme::Dark);
        assert_eq!(resolve_scheme(ThemeMode::Auto, &system), ColorScheme::Dark);
    }

    #[test]
    fn test_persisted_value_wins_when_enabled() {
        let storage = MemoryStorage::new();
        storage.insert("k", "auto");

        assert_eq!(
            initial_mode(ThemeMode::Dark, true, Some(&storage), "k"),
            ThemeMode::Auto
        );
        assert_eq!(
            initial_mode(ThemeMode::Dark, false, Some(&storage), "k"),
            ThemeMode::Dark
        );
        assert_eq!(initial_mode(ThemeMode::Dark, true, None, "k"), ThemeMode::Dark);
    }

    #[test]
    fn test_invalid_persisted_value_is_absent() {
        let storage = MemoryStorage::new();
        storage.insert("k", "purple");
        assert_eq!(read_persisted_mode(&storage, "k"), None);
        assert_eq!(
            initial_mode(ThemeMode::Light, true, Some(&storage), "k"),
            ThemeMode::Light
        );
    }

    #[test]
    fn test_storage_failures_are_swallowed() {
        assert_eq!(read_persisted_mode(&UnavailableStorage, "k"), None);
        assert!(!persist_mode(&UnavailableStorage, "k", ThemeMode::Dark));

        let storage = MemoryStorage::new();
        assert!(persist_mode(&storage, "k", ThemeMode::Dark));
        assert_eq!(storage.get("k").as_deref(), Some("dark"));
    }
}
