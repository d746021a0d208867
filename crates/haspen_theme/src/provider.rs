//! Theme provider and consumer hook
//!
//! A [`ThemeProvider`] is mounted at the top of a subtree. It creates a
//! [`ThemeContext`], publishes it in a child [`ContextScope`], and keeps it in
//! sync with the system preference until unmounted. Components inside the
//! subtree call [`use_theme`] with their scope to get the shared context.
//!
//! ```rust
//! use haspen_core::ContextScope;
//! use haspen_theme::{use_theme, MemoryRoot, ThemeEnvironment, ThemeMode, ThemeProvider, ThemeProviderConfig};
//!
//! let root = MemoryRoot::new();
//! let app = ContextScope::root();
//! let provider = ThemeProvider::mount(
//!     &app,
//!     ThemeProviderConfig::new().with_mode(ThemeMode::Dark),
//!     ThemeEnvironment::headless().with_root(root.clone()),
//! );
//!
//! let button_scope = provider.scope().child();
//! let theme = use_theme(&button_scope);
//! assert!(theme.is_dark());
//!
//! theme.toggle_mode();
//! assert_eq!(root.theme_attribute().as_deref(), Some("light"));
//! ```

use crate::config::ThemeProviderConfig;
use crate::environment::ThemeEnvironment;
use crate::state::ThemeContext;
use crate::theme::ThemeOverride;
use haspen_core::{ContextScope, InjectionKey};
use rustc_hash::FxHashSet;
use std::panic::Location;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

/// Lookup key for the nearest theme context
pub static THEME_CONTEXT: InjectionKey<ThemeContext> = InjectionKey::new("haspen.theme");

/// Call sites that already warned about a missing provider
static WARNED_CALL_SITES: OnceLock<Mutex<FxHashSet<(&'static str, u32, u32)>>> = OnceLock::new();

/// Owner of a theme context for one subtree
///
/// Dropping the provider unmounts it: the context is withdrawn from the scope
/// and the system preference subscription is cancelled. Consumers still
/// holding the context keep a working, but no longer system-synced, object.
pub struct ThemeProvider {
    context: Arc<ThemeContext>,
    scope: ContextScope,
}

impl ThemeProvider {
    /// Mount a provider below `parent`
    pub fn mount(parent: &ContextScope, config: ThemeProviderConfig, env: ThemeEnvironment) -> Self {
        let scope = parent.child();
        let context = ThemeContext::new(&config, env);
        scope.provide(&THEME_CONTEXT, Arc::clone(&context));

        tracing::debug!(depth = scope.depth(), mode = %context.mode(), "theme provider mounted");
        Self { context, scope }
    }

    /// Scope to hand to descendants
    pub fn scope(&self) -> &ContextScope {
        &self.scope
    }

    /// The context this provider owns
    pub fn context(&self) -> &Arc<ThemeContext> {
        &self.context
    }

    /// Replace the custom theme override
    pub fn set_theme_override(&self, theme: Option<ThemeOverride>) {
        self.context.set_custom_theme(theme);
    }

    /// Unmount explicitly
    pub fn unmount(self) {}
}

impl Drop for ThemeProvider {
    fn drop(&mut self) {
        self.scope.revoke(&THEME_CONTEXT);
        self.context.detach();
        tracing::debug!("theme provider unmounted");
    }
}

impl std::fmt::Debug for ThemeProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeProvider")
            .field("context", &self.context)
            .field("scope", &self.scope)
            .finish()
    }
}

/// Get the nearest theme context
///
/// Without a provider in scope this does not fail. It logs a warning (once per
/// call site) and returns a standalone light-mode context that neither
/// persists nor touches the document.
#[track_caller]
pub fn use_theme(scope: &ContextScope) -> Arc<ThemeContext> {
    if let Some(context) = scope.inject(&THEME_CONTEXT) {
        return context;
    }

    let caller = Location::caller();
    if first_warning_at(caller) {
        tracing::warn!(
            file = caller.file(),
            line = caller.line(),
            "use_theme called without a ThemeProvider in scope, using a standalone light theme"
        );
    }
    ThemeContext::standalone()
}

fn first_warning_at(caller: &'static Location<'static>) -> bool {
    WARNED_CALL_SITES
        .get_or_init(|| Mutex::new(FxHashSet::default()))
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .insert((caller.file(), caller.line(), caller.column()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warns_once_per_call_site() {
        #[track_caller]
        fn here() -> &'static Location<'static> {
            Location::caller()
        }

        let site = here();
        assert!(first_warning_at(site));
        assert!(!first_warning_at(site));
        assert!(first_warning_at(here()));
    }

    #[test]
    fn test_unmount_withdraws_context() {
        let app = ContextScope::root();
        let provider = ThemeProvider::mount(
            &app,
            ThemeProviderConfig::default(),
            ThemeEnvironment::headless(),
        );
        let child = provider.scope().child();
        assert!(child.has(&THEME_CONTEXT));
        assert!(!app.has(&THEME_CONTEXT));

        provider.unmount();
        assert!(!child.has(&THEME_CONTEXT));
    }
}
