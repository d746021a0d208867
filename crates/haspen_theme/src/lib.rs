//! Haspen Theme System
//!
//! Design tokens, light/dark/auto mode resolution, and projection of the
//! resolved theme onto a document root as CSS custom properties.
//!
//! # Overview
//!
//! - **Design tokens**: colors, spacing, typography, shadows, radii, transitions
//! - **Built-in themes**: a light theme and a dark theme sharing every key
//! - **Overrides**: partial themes deep-merged over the built-in theme
//! - **Mode resolution**: explicit light/dark, or `auto` following the system
//!   preference, optionally persisted across sessions
//! - **Providers**: one [`ThemeProvider`] per subtree owns a live
//!   [`ThemeContext`]; descendants find it with [`use_theme`]
//!
//! # Quick Start
//!
//! ```rust
//! use haspen_core::ContextScope;
//! use haspen_theme::{
//!     use_theme, ManualScheme, MemoryRoot, ThemeEnvironment, ThemeMode, ThemeProvider,
//!     ThemeProviderConfig, ColorScheme,
//! };
//!
//! let system = ManualScheme::new(ColorScheme::Light);
//! let root = MemoryRoot::new();
//! let env = ThemeEnvironment::headless()
//!     .with_system(system.clone())
//!     .with_root(root.clone());
//!
//! let app = ContextScope::root();
//! let provider = ThemeProvider::mount(
//!     &app,
//!     ThemeProviderConfig::new().with_mode(ThemeMode::Auto),
//!     env,
//! );
//!
//! let theme = use_theme(provider.scope());
//! assert!(theme.is_light());
//!
//! // The OS flips to dark; the context follows without any call
//! system.set(ColorScheme::Dark);
//! assert!(theme.is_dark());
//! assert_eq!(root.theme_attribute().as_deref(), Some("dark"));
//! ```
//!
//! # Root styles
//!
//! Each token becomes `--haspen-<category>-<token>` on the root element, and
//! `data-theme` carries the effective scheme. See [`dom`].

pub mod config;
pub mod dom;
pub mod environment;
pub mod error;
pub mod platform;
pub mod provider;
pub mod resolver;
pub mod state;
pub mod storage;
pub mod theme;
pub mod themes;
pub mod tokens;

#[cfg(feature = "watcher")]
pub mod watcher;

#[cfg(feature = "web")]
pub mod web;

// Re-export commonly used types
pub use config::{ThemeProviderConfig, DEFAULT_STORAGE_KEY};
pub use dom::{
    apply_theme_to_dom, css_variable_name, css_variables, render_css, MemoryRoot, RootSnapshot,
    StyleRoot, CSS_VAR_PREFIX, THEME_ATTRIBUTE, TRANSITION_CLASS,
};
pub use environment::ThemeEnvironment;
pub use error::{Result, StorageError, ThemeError};
pub use platform::{
    detect_system_color_scheme, FixedScheme, ManualScheme, OsScheme, SchemeCallback, SchemeWatch,
    SystemScheme,
};
pub use provider::{use_theme, ThemeProvider, THEME_CONTEXT};
pub use state::ThemeContext;
pub use storage::{FileStorage, MemoryStorage, ModeStorage, UnavailableStorage};
pub use theme::{ColorScheme, Theme, ThemeMode, ThemeOverride, TokenEntry};
pub use themes::{base_theme, dark_theme, light_theme, merge_themes, resolve_theme};
pub use tokens::*;

#[cfg(feature = "watcher")]
pub use watcher::{SystemSchemeWatcher, WatcherConfig};

#[cfg(feature = "web")]
pub use web::{DocumentRoot, LocalStorage, MediaQueryScheme};
