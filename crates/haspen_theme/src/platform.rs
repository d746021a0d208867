//! System color scheme sources
//!
//! A [`SystemScheme`] reports the operating system's light/dark preference
//! and, where the platform supports it, notifies watchers when it flips.

use crate::theme::ColorScheme;
use haspen_core::Signal;
use std::fmt;
use std::sync::Arc;

/// Callback invoked with the new scheme when the system preference changes
pub type SchemeCallback = Arc<dyn Fn(ColorScheme) + Send + Sync>;

/// Source of the system color scheme preference
pub trait SystemScheme: Send + Sync {
    /// Current system preference
    fn current(&self) -> ColorScheme;

    /// Watch for preference changes until the returned handle is dropped
    ///
    /// Sources that cannot observe changes return [`SchemeWatch::inert`].
    fn watch(&self, on_change: SchemeCallback) -> SchemeWatch;
}

/// Live subscription to a [`SystemScheme`]; dropping it unsubscribes
#[must_use = "dropping a SchemeWatch cancels the subscription"]
pub struct SchemeWatch {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl SchemeWatch {
    /// A watch that runs `cancel` when dropped
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// A watch with nothing to cancel
    pub fn inert() -> Self {
        Self { cancel: None }
    }

    /// Cancel the subscription now
    pub fn cancel(mut self) {
        self.run_cancel();
    }

    fn run_cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for SchemeWatch {
    fn drop(&mut self) {
        self.run_cancel();
    }
}

impl fmt::Debug for SchemeWatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemeWatch")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

/// A preference that never changes
#[derive(Clone, Copy, Debug, Default)]
pub struct FixedScheme(pub ColorScheme);

impl FixedScheme {
    pub fn light() -> Self {
        Self(ColorScheme::Light)
    }

    pub fn dark() -> Self {
        Self(ColorScheme::Dark)
    }
}

impl SystemScheme for FixedScheme {
    fn current(&self) -> ColorScheme {
        self.0
    }

    fn watch(&self, _on_change: SchemeCallback) -> SchemeWatch {
        SchemeWatch::inert()
    }
}

/// A preference set by the host application
///
/// Useful where the embedding shell reports scheme changes itself, and for
/// simulating OS flips in tests. Clones share the same preference.
#[derive(Clone, Debug)]
pub struct ManualScheme {
    scheme: Signal<ColorScheme>,
}

impl ManualScheme {
    pub fn new(initial: ColorScheme) -> Self {
        Self {
            scheme: Signal::new(initial),
        }
    }

    /// Change the preference, notifying watchers if it differs
    pub fn set(&self, scheme: ColorScheme) {
        if self.scheme.set_if_changed(scheme) {
            tracing::debug!(%scheme, "system color scheme changed");
        }
    }

    /// Number of active watchers
    pub fn watcher_count(&self) -> usize {
        self.scheme.listener_count()
    }
}

impl Default for ManualScheme {
    fn default() -> Self {
        Self::new(ColorScheme::Light)
    }
}

impl SystemScheme for ManualScheme {
    fn current(&self) -> ColorScheme {
        self.scheme.get()
    }

    fn watch(&self, on_change: SchemeCallback) -> SchemeWatch {
        let id = self.scheme.subscribe(move |scheme| on_change(*scheme));
        let scheme = self.scheme.clone();
        SchemeWatch::new(move || {
            scheme.unsubscribe(id);
        })
    }
}

/// Detect the current system color scheme
///
/// Uses the native desktop setting where available and falls back to light.
#[cfg(not(target_arch = "wasm32"))]
pub fn detect_system_color_scheme() -> ColorScheme {
    if matches!(dark_light::detect(), dark_light::Mode::Dark) {
        ColorScheme::Dark
    } else {
        ColorScheme::Light
    }
}

/// Detect the current system color scheme
///
/// Queries `prefers-color-scheme` when browser support is compiled in.
#[cfg(target_arch = "wasm32")]
pub fn detect_system_color_scheme() -> ColorScheme {
    #[cfg(feature = "web")]
    {
        crate::web::media_query_scheme()
    }
    #[cfg(not(feature = "web"))]
    {
        ColorScheme::Light
    }
}

/// The operating system's preference, read on every query
///
/// Does not observe changes by itself; use `SystemSchemeWatcher` (feature
/// `watcher`) for live updates.
#[derive(Clone, Copy, Debug, Default)]
pub struct OsScheme;

impl SystemScheme for OsScheme {
    fn current(&self) -> ColorScheme {
        detect_system_color_scheme()
    }

    fn watch(&self, _on_change: SchemeCallback) -> SchemeWatch {
        SchemeWatch::inert()
    }
}
