//! Scoped context injection
//!
//! A [`ContextScope`] is one node in a tree that mirrors the component tree.
//! A component provides a value into its scope; any descendant scope can look
//! it up with [`ContextScope::inject`], and the nearest provider wins.
//!
//! Values are shared, not copied: `inject` hands back the same `Arc` that was
//! provided, so every consumer of a provider sees the same live object.
//!
//! ```rust
//! use haspen_core::context::{ContextScope, InjectionKey};
//! use std::sync::Arc;
//!
//! static LOCALE: InjectionKey<String> = InjectionKey::new("app.locale");
//!
//! let root = ContextScope::root();
//! root.provide(&LOCALE, Arc::new("en".to_string()));
//!
//! let page = root.child();
//! let widget = page.child();
//! assert_eq!(widget.inject(&LOCALE).as_deref().map(String::as_str), Some("en"));
//!
//! page.provide(&LOCALE, Arc::new("fr".to_string()));
//! assert_eq!(widget.inject(&LOCALE).as_deref().map(String::as_str), Some("fr"));
//! ```

use rustc_hash::FxHashMap;
use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

/// Process-wide root scope
static GLOBAL_SCOPE: OnceLock<ContextScope> = OnceLock::new();

/// Key identifying a provided value: hashed name plus value type
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ContextKey {
    /// Hash of the key name
    key_hash: u64,
    /// Type ID of the provided value
    type_id: TypeId,
}

impl ContextKey {
    /// Create a new ContextKey from a hashable key and type
    pub fn new<T: ?Sized + 'static, K: Hash + ?Sized>(key: &K) -> Self {
        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        key.hash(&mut hasher);
        Self {
            key_hash: hasher.finish(),
            type_id: TypeId::of::<T>(),
        }
    }
}

/// Typed lookup handle for a provided value
///
/// Declare one as a `static` per kind of context. Two keys are the same key
/// when both their names and value types match, so names should be
/// namespaced (`"crate.thing"`).
pub struct InjectionKey<T: ?Sized> {
    name: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T: ?Sized> InjectionKey<T> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _marker: PhantomData,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<T: ?Sized + 'static> InjectionKey<T> {
    fn context_key(&self) -> ContextKey {
        ContextKey::new::<T, _>(self.name)
    }
}

impl<T: ?Sized> fmt::Debug for InjectionKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("InjectionKey").field(&self.name).finish()
    }
}

type Provided = Arc<dyn Any + Send + Sync>;

struct ScopeNode {
    parent: Option<ContextScope>,
    provided: RwLock<FxHashMap<ContextKey, Provided>>,
}

/// A node in the context tree
///
/// Cloning a scope yields another handle to the same node.
#[derive(Clone)]
pub struct ContextScope {
    node: Arc<ScopeNode>,
}

impl ContextScope {
    /// Create a new root scope with no parent
    pub fn root() -> Self {
        Self {
            node: Arc::new(ScopeNode {
                parent: None,
                provided: RwLock::new(FxHashMap::default()),
            }),
        }
    }

    /// The process-wide root scope
    pub fn global() -> &'static ContextScope {
        GLOBAL_SCOPE.get_or_init(ContextScope::root)
    }

    /// Create a child scope whose lookups fall back to this one
    pub fn child(&self) -> Self {
        Self {
            node: Arc::new(ScopeNode {
                parent: Some(self.clone()),
                provided: RwLock::new(FxHashMap::default()),
            }),
        }
    }

    pub fn parent(&self) -> Option<&ContextScope> {
        self.node.parent.as_ref()
    }

    /// Number of ancestors above this scope
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut current = self.parent();
        while let Some(scope) = current {
            depth += 1;
            current = scope.parent();
        }
        depth
    }

    /// Provide a value to this scope and its descendants
    ///
    /// Replaces any value previously provided here under the same key.
    pub fn provide<T: Send + Sync + 'static>(&self, key: &InjectionKey<T>, value: Arc<T>) {
        tracing::trace!(key = key.name(), depth = self.depth(), "provide context");
        self.node
            .provided
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.context_key(), value);
    }

    /// Look up the nearest value provided under `key`
    pub fn inject<T: Send + Sync + 'static>(&self, key: &InjectionKey<T>) -> Option<Arc<T>> {
        let context_key = key.context_key();
        let mut current = Some(self);
        while let Some(scope) = current {
            let found = scope
                .node
                .provided
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .get(&context_key)
                .cloned();
            if let Some(value) = found {
                return value.downcast::<T>().ok();
            }
            current = scope.parent();
        }
        None
    }

    /// Whether `key` resolves from this scope
    pub fn has<T: Send + Sync + 'static>(&self, key: &InjectionKey<T>) -> bool {
        self.inject(key).is_some()
    }

    /// Withdraw a value provided directly on this scope
    pub fn revoke<T: Send + Sync + 'static>(&self, key: &InjectionKey<T>) -> bool {
        self.node
            .provided
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&key.context_key())
            .is_some()
    }

    /// Whether two handles refer to the same node
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.node, &other.node)
    }
}

impl Default for ContextScope {
    fn default() -> Self {
        Self::root()
    }
}

impl fmt::Debug for ContextScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let provided = self
            .node
            .provided
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len();
        f.debug_struct("ContextScope")
            .field("depth", &self.depth())
            .field("provided", &provided)
            .finish()
    }
}
