//! Host services a theme provider talks to

use crate::dom::StyleRoot;
use crate::platform::{FixedScheme, SystemScheme};
use crate::storage::ModeStorage;
use std::fmt;
use std::sync::Arc;

/// Storage, system preference and style root used by a provider
///
/// Each service is swappable so the same provider logic runs in a browser,
/// in a native shell, on a server render pass and in tests.
#[derive(Clone)]
pub struct ThemeEnvironment {
    /// Where the mode selection is persisted, if anywhere
    pub storage: Option<Arc<dyn ModeStorage>>,
    /// Source of the system light/dark preference
    pub system: Arc<dyn SystemScheme>,
    /// Root element receiving theme styles; `None` outside a DOM
    pub root: Option<Arc<dyn StyleRoot>>,
}

impl ThemeEnvironment {
    /// No storage, no style root, and a fixed light system preference
    pub fn headless() -> Self {
        Self {
            storage: None,
            system: Arc::new(FixedScheme::light()),
            root: None,
        }
    }

    /// Services available in the current environment
    ///
    /// In the browser (feature `web`) this is `localStorage`,
    /// `prefers-color-scheme` and the document element. Natively it is the
    /// OS color scheme, polled when the `watcher` feature is enabled, with no
    /// storage or root.
    pub fn detect() -> Self {
        #[cfg(all(feature = "web", target_arch = "wasm32"))]
        {
            use crate::web::{DocumentRoot, LocalStorage, MediaQueryScheme};

            Self {
                storage: Some(Arc::new(LocalStorage)),
                system: Arc::new(MediaQueryScheme),
                root: DocumentRoot::detect().map(|root| Arc::new(root) as Arc<dyn StyleRoot>),
            }
        }

        #[cfg(all(not(target_arch = "wasm32"), feature = "watcher"))]
        {
            Self {
                storage: None,
                system: Arc::new(crate::watcher::SystemSchemeWatcher::default()),
                root: None,
            }
        }

        #[cfg(all(not(target_arch = "wasm32"), not(feature = "watcher")))]
        {
            Self {
                storage: None,
                system: Arc::new(crate::platform::OsScheme),
                root: None,
            }
        }

        #[cfg(all(target_arch = "wasm32", not(feature = "web")))]
        {
            Self::headless()
        }
    }

    pub fn with_storage(mut self, storage: impl ModeStorage + 'static) -> Self {
        self.storage = Some(Arc::new(storage));
        self
    }

    pub fn with_system(mut self, system: impl SystemScheme + 'static) -> Self {
        self.system = Arc::new(system);
        self
    }

    pub fn with_root(mut self, root: impl StyleRoot + 'static) -> Self {
        self.root = Some(Arc::new(root));
        self
    }
}

impl Default for ThemeEnvironment {
    fn default() -> Self {
        Self::headless()
    }
}

impl fmt::Debug for ThemeEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeEnvironment")
            .field("storage", &self.storage.is_some())
            .field("system", &self.system.current())
            .field("root", &self.root.is_some())
            .finish()
    }
}
