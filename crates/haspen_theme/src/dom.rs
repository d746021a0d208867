//! Projection of a resolved theme onto the document root
//!
//! Every leaf token becomes one CSS custom property named
//! `--haspen-<category>-<token>`:
//!
//! | token                          | property                       |
//! |--------------------------------|--------------------------------|
//! | `colors.primary_hover`         | `--haspen-colors-primary-hover`|
//! | `spacing.xxl`                  | `--haspen-spacing-2xl`         |
//! | `typography.font_weight.bold`  | `--haspen-font-weight-bold`    |
//! | `transitions.timing.ease_in`   | `--haspen-timing-ease-in`      |
//!
//! The root also carries `data-theme="light"` or `data-theme="dark"`. External
//! stylesheets key off both, so the names are stable.

use crate::error::ThemeError;
use crate::theme::Theme;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write as _;
use std::sync::{Arc, Mutex, PoisonError};

/// Namespace prefix of every theme custom property
pub const CSS_VAR_PREFIX: &str = "--haspen";

/// Root attribute holding the effective scheme
pub const THEME_ATTRIBUTE: &str = "data-theme";

/// Root class enabling theme transition animations
pub const TRANSITION_CLASS: &str = "haspen-theme-transition";

/// Build the custom property name for a token
pub fn css_variable_name(category: &str, key: &str) -> String {
    format!("{CSS_VAR_PREFIX}-{category}-{key}")
}

/// `(property, value)` pairs for every token of `theme`
pub fn css_variables(theme: &Theme) -> Vec<(String, String)> {
    theme
        .token_entries()
        .into_iter()
        .map(|entry| (css_variable_name(entry.category, entry.key), entry.value))
        .collect()
}

/// Render `theme` as a CSS rule for server-side or build-time output
pub fn render_css(theme: &Theme, selector: &str) -> String {
    let mut css = String::new();
    let _ = writeln!(css, "{selector} {{");
    let _ = writeln!(css, "  color-scheme: {};", theme.mode);
    for (name, value) in css_variables(theme) {
        let _ = writeln!(css, "  {name}: {value};");
    }
    css.push_str("}\n");
    css
}

/// A document root that theme styles can be written to
pub trait StyleRoot: Send + Sync {
    /// Set an inline style property
    fn set_property(&self, name: &str, value: &str) -> Result<(), ThemeError>;

    /// Set an attribute
    fn set_attribute(&self, name: &str, value: &str) -> Result<(), ThemeError>;

    /// Add or remove a class
    fn set_class(&self, class: &str, enabled: bool) -> Result<(), ThemeError>;
}

/// Write `theme` to `root`
///
/// With no root (a non-DOM environment) this does nothing. Every property is
/// attempted even if an earlier write fails; the first error is returned.
pub fn apply_theme_to_dom(root: Option<&dyn StyleRoot>, theme: &Theme) -> Result<(), ThemeError> {
    let Some(root) = root else {
        tracing::trace!("no style root, skipping theme application");
        return Ok(());
    };

    let mut first_error = None;
    for (name, value) in css_variables(theme) {
        if let Err(e) = root.set_property(&name, &value) {
            tracing::warn!(property = %name, error = %e, "failed to set theme property");
            first_error.get_or_insert(e);
        }
    }
    if let Err(e) = root.set_attribute(THEME_ATTRIBUTE, theme.mode.as_str()) {
        first_error.get_or_insert(e);
    }

    match first_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

/// Recorded state of a [`MemoryRoot`]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RootSnapshot {
    pub properties: BTreeMap<String, String>,
    pub attributes: BTreeMap<String, String>,
    pub classes: BTreeSet<String>,
}

impl RootSnapshot {
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }
}

#[derive(Debug, Default)]
struct MemoryRootState {
    snapshot: RootSnapshot,
    writes: usize,
}

/// In-memory style root
///
/// Stands in for the document root on servers, in native shells and in tests.
/// Clones share the same state.
#[derive(Clone, Debug, Default)]
pub struct MemoryRoot {
    state: Arc<Mutex<MemoryRootState>>,
}

impl MemoryRoot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the current root state
    pub fn snapshot(&self) -> RootSnapshot {
        self.lock().snapshot.clone()
    }

    /// Total number of writes so far
    pub fn write_count(&self) -> usize {
        self.lock().writes
    }

    /// Current `data-theme` value
    pub fn theme_attribute(&self) -> Option<String> {
        self.lock().snapshot.attributes.get(THEME_ATTRIBUTE).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryRootState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl StyleRoot for MemoryRoot {
    fn set_property(&self, name: &str, value: &str) -> Result<(), ThemeError> {
        let mut state = self.lock();
        state.writes += 1;
        state
            .snapshot
            .properties
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn set_attribute(&self, name: &str, value: &str) -> Result<(), ThemeError> {
        let mut state = self.lock();
        state.writes += 1;
        state
            .snapshot
            .attributes
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn set_class(&self, class: &str, enabled: bool) -> Result<(), ThemeError> {
        let mut state = self.lock();
        state.writes += 1;
        if enabled {
            state.snapshot.classes.insert(class.to_string());
        } else {
            state.snapshot.classes.remove(class);
        }
        Ok(())
    }
}
