//! Browser backends: `localStorage`, `prefers-color-scheme` and the document
//! element
//!
//! Browser handles are not `Send`, so the backends themselves are unit types
//! that look the handles up on each call. Media query listeners live in a
//! thread-local table keyed by watch id.

use crate::dom::StyleRoot;
use crate::error::{StorageError, ThemeError};
use crate::platform::{SchemeCallback, SchemeWatch, SystemScheme};
use crate::storage::ModeStorage;
use crate::theme::ColorScheme;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{HtmlElement, MediaQueryList, MediaQueryListEvent};

const DARK_QUERY: &str = "(prefers-color-scheme: dark)";

type ChangeListener = Closure<dyn FnMut(MediaQueryListEvent)>;

thread_local! {
    static LISTENERS: RefCell<HashMap<u64, (MediaQueryList, ChangeListener)>> = RefCell::new(HashMap::new());
    static NEXT_LISTENER: Cell<u64> = const { Cell::new(0) };
}

fn js_error(value: &JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{value:?}"))
}

// ========== localStorage ==========

/// `window.localStorage`
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorage;

fn local_storage() -> Result<web_sys::Storage, StorageError> {
    let window =
        web_sys::window().ok_or_else(|| StorageError::Unavailable("no window object".into()))?;
    window
        .local_storage()
        .map_err(|e| StorageError::Unavailable(js_error(&e)))?
        .ok_or_else(|| StorageError::Unavailable("localStorage is disabled".into()))
}

impl ModeStorage for LocalStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        local_storage()?
            .get_item(key)
            .map_err(|e| StorageError::Backend(js_error(&e)))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        local_storage()?
            .set_item(key, value)
            .map_err(|e| StorageError::Backend(js_error(&e)))
    }
}

// ========== prefers-color-scheme ==========

fn dark_media_query() -> Option<MediaQueryList> {
    web_sys::window()?.match_media(DARK_QUERY).ok().flatten()
}

/// Current `prefers-color-scheme`, light when it cannot be queried
pub(crate) fn media_query_scheme() -> ColorScheme {
    match dark_media_query() {
        Some(query) if query.matches() => ColorScheme::Dark,
        _ => ColorScheme::Light,
    }
}

/// System preference from the `prefers-color-scheme` media query
#[derive(Clone, Copy, Debug, Default)]
pub struct MediaQueryScheme;

impl SystemScheme for MediaQueryScheme {
    fn current(&self) -> ColorScheme {
        media_query_scheme()
    }

    fn watch(&self, on_change: SchemeCallback) -> SchemeWatch {
        let Some(query) = dark_media_query() else {
            return SchemeWatch::inert();
        };

        let listener: ChangeListener = Closure::new(move |event: MediaQueryListEvent| {
            let scheme = if event.matches() {
                ColorScheme::Dark
            } else {
                ColorScheme::Light
            };
            on_change(scheme);
        });

        if let Err(e) =
            query.add_event_listener_with_callback("change", listener.as_ref().unchecked_ref())
        {
            tracing::warn!(error = %js_error(&e), "failed to listen for color scheme changes");
            return SchemeWatch::inert();
        }

        let id = NEXT_LISTENER.with(|next| {
            let id = next.get();
            next.set(id + 1);
            id
        });
        LISTENERS.with(|listeners| listeners.borrow_mut().insert(id, (query, listener)));

        SchemeWatch::new(move || {
            let removed = LISTENERS.with(|listeners| listeners.borrow_mut().remove(&id));
            if let Some((query, listener)) = removed {
                let _ = query
                    .remove_event_listener_with_callback("change", listener.as_ref().unchecked_ref());
            }
        })
    }
}

// ========== document element ==========

fn document_element() -> Option<HtmlElement> {
    web_sys::window()?
        .document()?
        .document_element()?
        .dyn_into::<HtmlElement>()
        .ok()
}

/// `document.documentElement`
#[derive(Clone, Copy, Debug)]
pub struct DocumentRoot {
    _private: (),
}

impl DocumentRoot {
    /// The document root, or `None` outside a browser document
    pub fn detect() -> Option<Self> {
        document_element().map(|_| Self { _private: () })
    }

    fn element(&self) -> Result<HtmlElement, ThemeError> {
        document_element().ok_or_else(|| ThemeError::Style("document element is gone".into()))
    }
}

impl StyleRoot for DocumentRoot {
    fn set_property(&self, name: &str, value: &str) -> Result<(), ThemeError> {
        self.element()?
            .style()
            .set_property(name, value)
            .map_err(|e| ThemeError::Style(js_error(&e)))
    }

    fn set_attribute(&self, name: &str, value: &str) -> Result<(), ThemeError> {
        self.element()?
            .set_attribute(name, value)
            .map_err(|e| ThemeError::Style(js_error(&e)))
    }

    fn set_class(&self, class: &str, enabled: bool) -> Result<(), ThemeError> {
        self.element()?
            .class_list()
            .toggle_with_force(class, enabled)
            .map(|_| ())
            .map_err(|e| ThemeError::Style(js_error(&e)))
    }
}
