//! Live theme state shared by a provider and its consumers
//!
//! A [`ThemeContext`] owns three signals:
//! - `mode`: the user selection (`light`, `dark` or `auto`)
//! - `scheme`: the effective scheme after resolving `auto`
//! - `theme`: the base theme for `scheme` merged with the custom override
//!
//! Each public mutation updates the signals, then writes the theme to the
//! style root once. `is_dark` / `is_light` are always computed from `scheme`.
//!
//! Mutations are serialized by one lock, so system preference changes
//! arriving on a watcher thread cannot interleave with `set_mode`. Listeners
//! are notified after the lock is released and observe the finished state.

use crate::config::ThemeProviderConfig;
use crate::dom::{apply_theme_to_dom, StyleRoot, TRANSITION_CLASS};
use crate::environment::ThemeEnvironment;
use crate::error::Result;
use crate::platform::{SchemeWatch, SystemScheme};
use crate::resolver::{initial_mode, persist_mode, resolve_scheme};
use crate::storage::ModeStorage;
use crate::theme::{ColorScheme, Theme, ThemeMode, ThemeOverride};
use crate::themes::resolve_theme;
use haspen_core::{ReadSignal, Signal};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, Weak};

/// Observable theme state
pub struct ThemeContext {
    mode: Signal<ThemeMode>,
    scheme: Signal<ColorScheme>,
    theme: Signal<Arc<Theme>>,
    custom: RwLock<Option<ThemeOverride>>,

    persist: bool,
    storage_key: String,
    enable_transitions: bool,

    storage: Option<Arc<dyn ModeStorage>>,
    system: Arc<dyn SystemScheme>,
    root: Option<Arc<dyn StyleRoot>>,

    /// Held for the whole of every mutation and root application
    mutation: Mutex<()>,
    /// System preference subscription, held only while the selection is `Auto`
    system_watch: Mutex<Option<SchemeWatch>>,
    this: Weak<ThemeContext>,
}

/// Signals written during a mutation, notified once it completes
#[derive(Default)]
struct Pending {
    mode: bool,
    scheme: bool,
    theme: bool,
}

impl ThemeContext {
    /// Create a context, resolve its initial state and apply it to the root
    pub fn new(config: &ThemeProviderConfig, env: ThemeEnvironment) -> Arc<Self> {
        let ThemeEnvironment {
            storage,
            system,
            root,
        } = env;

        let mode = initial_mode(
            config.mode,
            config.persist_mode,
            storage.as_deref(),
            &config.storage_key,
        );
        let scheme = resolve_scheme(mode, system.as_ref());
        let theme = resolve_theme(scheme, config.theme.as_ref());

        tracing::debug!(%mode, %scheme, persist = config.persist_mode, "creating theme context");

        let context = Arc::new_cyclic(|this| Self {
            mode: Signal::new(mode),
            scheme: Signal::new(scheme),
            theme: Signal::new(Arc::new(theme)),
            custom: RwLock::new(config.theme.clone()),
            persist: config.persist_mode,
            storage_key: config.storage_key.clone(),
            enable_transitions: config.enable_transitions,
            storage,
            system,
            root,
            mutation: Mutex::new(()),
            system_watch: Mutex::new(None),
            this: this.clone(),
        });

        // Subscribes before re-resolving, so no flip is missed in between
        context.mutate(|pending| context.refresh_locked(pending));
        context
    }

    /// Standalone context used when no provider is in scope
    ///
    /// Light mode, built-in light theme, no persistence, no style root.
    pub fn standalone() -> Arc<Self> {
        let config = ThemeProviderConfig {
            enable_transitions: false,
            ..ThemeProviderConfig::default()
        };
        Self::new(&config, ThemeEnvironment::headless())
    }

    // ========== Reads ==========

    /// The resolved theme
    pub fn theme(&self) -> Arc<Theme> {
        self.theme.get()
    }

    /// The user's mode selection
    pub fn mode(&self) -> ThemeMode {
        self.mode.get()
    }

    /// The effective color scheme
    pub fn scheme(&self) -> ColorScheme {
        self.scheme.get()
    }

    pub fn is_dark(&self) -> bool {
        self.scheme().is_dark()
    }

    pub fn is_light(&self) -> bool {
        !self.is_dark()
    }

    /// The custom override currently merged into the theme
    pub fn custom_theme(&self) -> Option<ThemeOverride> {
        self.custom
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Observe theme changes
    pub fn theme_signal(&self) -> ReadSignal<Arc<Theme>> {
        self.theme.read_only()
    }

    /// Observe selection changes
    pub fn mode_signal(&self) -> ReadSignal<ThemeMode> {
        self.mode.read_only()
    }

    /// Observe effective scheme changes
    pub fn scheme_signal(&self) -> ReadSignal<ColorScheme> {
        self.scheme.read_only()
    }

    /// Whether the selection is written to storage
    pub fn persists_mode(&self) -> bool {
        self.persist && self.storage.is_some()
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    /// Whether a system preference subscription is active
    pub fn is_following_system(&self) -> bool {
        self.lock_watch().is_some()
    }

    // ========== Mutations ==========

    /// Select a mode, re-resolve and apply
    pub fn set_mode(&self, mode: ThemeMode) {
        self.mutate(|pending| {
            let previous = self.mode.replace(mode);
            pending.mode = true;
            tracing::debug!(from = %previous, to = %mode, "set theme mode");

            if self.persist {
                if let Some(storage) = &self.storage {
                    persist_mode(storage.as_ref(), &self.storage_key, mode);
                }
            }
            self.refresh_locked(pending);
        });
    }

    /// Select a mode from its literal
    ///
    /// Anything other than `light`, `dark` or `auto` is rejected and leaves
    /// the state untouched.
    pub fn set_mode_str(&self, value: &str) -> Result<()> {
        match value.parse::<ThemeMode>() {
            Ok(mode) => {
                self.set_mode(mode);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(value, "ignoring invalid theme mode");
                Err(e)
            }
        }
    }

    /// Flip between light and dark based on the effective scheme
    ///
    /// From `auto` this selects the opposite of what the system currently
    /// shows, leaving `auto`.
    pub fn toggle_mode(&self) {
        let next = match self.scheme() {
            ColorScheme::Dark => ThemeMode::Light,
            ColorScheme::Light => ThemeMode::Dark,
        };
        self.set_mode(next);
    }

    /// Replace the custom override and re-apply
    pub fn set_custom_theme(&self, theme: Option<ThemeOverride>) {
        self.mutate(|pending| {
            *self.custom.write().unwrap_or_else(PoisonError::into_inner) = theme;
            self.rebuild_locked(pending);
            self.apply_locked();
        });
    }

    /// Write the current theme to the style root
    ///
    /// A no-op without a root. Failures are logged, never returned.
    pub fn apply_theme(&self) {
        let _guard = self.lock_mutation();
        self.apply_locked();
    }

    /// Stop following the system preference
    ///
    /// Called when the owning provider unmounts. The last applied styles stay
    /// on the root.
    pub(crate) fn detach(&self) {
        let _guard = self.lock_mutation();
        if self.lock_watch().take().is_some() {
            tracing::debug!("stopped following system color scheme");
        }
    }

    // ========== Internals ==========

    /// Run `f` under the mutation lock, then notify the signals it wrote
    fn mutate(&self, f: impl FnOnce(&mut Pending)) {
        let mut pending = Pending::default();
        {
            let _guard = self.lock_mutation();
            f(&mut pending);
        }

        if pending.mode {
            self.mode.notify();
        }
        if pending.scheme {
            self.scheme.notify();
        }
        if pending.theme {
            self.theme.notify();
        }
    }

    /// Re-resolve the effective scheme and theme, then apply once
    fn refresh_locked(&self, pending: &mut Pending) {
        let mode = self.mode.get();
        self.sync_system_watch(mode);

        let scheme = resolve_scheme(mode, self.system.as_ref());
        if self.scheme.replace(scheme) != scheme {
            pending.scheme = true;
        }
        self.rebuild_locked(pending);
        self.apply_locked();
    }

    fn rebuild_locked(&self, pending: &mut Pending) {
        let custom = self.custom_theme();
        let theme = resolve_theme(self.scheme.get(), custom.as_ref());
        self.theme.replace(Arc::new(theme));
        pending.theme = true;
    }

    fn apply_locked(&self) {
        let Some(root) = self.root.as_deref() else {
            return;
        };

        let theme = self.theme.get();
        tracing::debug!(scheme = %theme.mode, "applying theme to root");

        if let Err(e) = root.set_class(TRANSITION_CLASS, self.enable_transitions) {
            tracing::warn!(error = %e, "failed to toggle theme transition class");
        }
        if let Err(e) = apply_theme_to_dom(Some(root), &theme) {
            tracing::warn!(error = %e, "theme applied with errors");
        }
    }

    /// Subscribe to the system preference while `Auto`, unsubscribe otherwise
    fn sync_system_watch(&self, mode: ThemeMode) {
        let mut watch = self.lock_watch();
        match (mode, watch.is_some()) {
            (ThemeMode::Auto, false) => {
                let this = self.this.clone();
                *watch = Some(self.system.watch(Arc::new(move |scheme| {
                    if let Some(context) = this.upgrade() {
                        context.on_system_change(scheme);
                    }
                })));
                tracing::debug!("following system color scheme");
            }
            (ThemeMode::Light | ThemeMode::Dark, true) => {
                *watch = None;
                tracing::debug!("stopped following system color scheme");
            }
            _ => {}
        }
    }

    /// Reported changes may arrive late or out of order, so the scheme is
    /// re-read from the source under the lock
    fn on_system_change(&self, reported: ColorScheme) {
        self.mutate(|pending| {
            if self.mode.get() != ThemeMode::Auto {
                return;
            }
            let scheme = self.system.current();
            if self.scheme.replace(scheme) == scheme {
                return;
            }
            pending.scheme = true;
            tracing::debug!(%scheme, %reported, "system color scheme changed");
            self.rebuild_locked(pending);
            self.apply_locked();
        });
    }

    fn lock_mutation(&self) -> MutexGuard<'_, ()> {
        self.mutation.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_watch(&self) -> MutexGuard<'_, Option<SchemeWatch>> {
        self.system_watch
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for ThemeContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeContext")
            .field("mode", &self.mode())
            .field("scheme", &self.scheme())
            .field("persist", &self.persist)
            .field("storage_key", &self.storage_key)
            .field("enable_transitions", &self.enable_transitions)
            .finish()
    }
}
