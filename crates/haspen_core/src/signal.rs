//! Reactive signals
//!
//! A [`Signal`] is a shared, observable cell. Cloning a signal yields another
//! handle to the same cell, so every holder observes the same value and the
//! same listeners.
//!
//! Listeners are called synchronously after a write, once the signal's locks
//! have been released. A listener may therefore read the signal, or even write
//! to it, without deadlocking.
//!
//! ```rust
//! use haspen_core::signal::Signal;
//! use std::sync::{Arc, Mutex};
//!
//! let count = Signal::new(0i32);
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let seen_clone = seen.clone();
//!
//! let id = count.subscribe(move |v| seen_clone.lock().unwrap().push(*v));
//! count.set(5);
//! count.update(|v| v * 2);
//! count.unsubscribe(id);
//! count.set(0);
//!
//! assert_eq!(*seen.lock().unwrap(), vec![5, 10]);
//! ```

use slotmap::{new_key_type, SlotMap};
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

new_key_type! {
    /// Handle returned by [`Signal::subscribe`]
    pub struct SubscriptionId;
}

type Listener<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct SignalCell<T> {
    value: RwLock<T>,
    listeners: Mutex<SlotMap<SubscriptionId, Listener<T>>>,
}

/// A shared observable value
pub struct Signal<T> {
    cell: Arc<SignalCell<T>>,
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self {
            cell: Arc::clone(&self.cell),
        }
    }
}

impl<T: Clone + Send + Sync + 'static> Signal<T> {
    /// Create a new signal holding `initial`
    pub fn new(initial: T) -> Self {
        Self {
            cell: Arc::new(SignalCell {
                value: RwLock::new(initial),
                listeners: Mutex::new(SlotMap::with_key()),
            }),
        }
    }

    /// Get a clone of the current value
    pub fn get(&self) -> T {
        self.cell
            .value
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Borrow the current value for the duration of `f`
    ///
    /// `f` must not write to this signal.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let guard = self.cell.value.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    /// Replace the value and notify every listener
    pub fn set(&self, value: T) {
        *self.cell.value.write().unwrap_or_else(PoisonError::into_inner) = value.clone();
        self.notify_with(&value);
    }

    /// Replace the value without notifying, returning the previous value
    ///
    /// Pair with [`notify`](Self::notify) to publish several writes once they
    /// are all in place.
    pub fn replace(&self, value: T) -> T {
        std::mem::replace(
            &mut *self.cell.value.write().unwrap_or_else(PoisonError::into_inner),
            value,
        )
    }

    /// Notify every listener with the current value
    pub fn notify(&self) {
        let value = self.get();
        self.notify_with(&value);
    }

    /// Update the value with a function, then notify
    pub fn update(&self, f: impl FnOnce(&T) -> T) {
        let next = {
            let mut guard = self.cell.value.write().unwrap_or_else(PoisonError::into_inner);
            let next = f(&guard);
            *guard = next.clone();
            next
        };
        self.notify_with(&next);
    }

    /// Register a listener, called with the new value after every write
    pub fn subscribe(&self, listener: impl Fn(&T) + Send + Sync + 'static) -> SubscriptionId {
        self.cell
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(Arc::new(listener))
    }

    /// Remove a listener. Returns `false` if it was already removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.cell
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id)
            .is_some()
    }

    /// Number of registered listeners
    pub fn listener_count(&self) -> usize {
        self.cell
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// A read-only view sharing this signal's cell
    pub fn read_only(&self) -> ReadSignal<T> {
        ReadSignal {
            signal: self.clone(),
        }
    }

    /// Whether two handles refer to the same cell
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.cell, &other.cell)
    }

    fn notify_with(&self, value: &T) {
        // Snapshot so listeners run without the listener lock held
        let listeners: Vec<Listener<T>> = self
            .cell
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect();

        tracing::trace!(listeners = listeners.len(), "signal notify");
        for listener in listeners {
            listener(value);
        }
    }
}

impl<T: Clone + PartialEq + Send + Sync + 'static> Signal<T> {
    /// Replace the value only if it differs. Returns whether it changed.
    pub fn set_if_changed(&self, value: T) -> bool {
        {
            let mut guard = self.cell.value.write().unwrap_or_else(PoisonError::into_inner);
            if *guard == value {
                return false;
            }
            *guard = value.clone();
        }
        self.notify_with(&value);
        true
    }
}

impl<T: Clone + Default + Send + Sync + 'static> Default for Signal<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.cell.value.read().unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("Signal").field("value", &*value).finish()
    }
}

/// Read-only view of a [`Signal`]
///
/// Holders can observe and subscribe but never write.
pub struct ReadSignal<T> {
    signal: Signal<T>,
}

impl<T> Clone for ReadSignal<T> {
    fn clone(&self) -> Self {
        Self {
            signal: self.signal.clone(),
        }
    }
}

impl<T: Clone + Send + Sync + 'static> ReadSignal<T> {
    pub fn get(&self) -> T {
        self.signal.get()
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.signal.with(f)
    }

    pub fn subscribe(&self, listener: impl Fn(&T) + Send + Sync + 'static) -> SubscriptionId {
        self.signal.subscribe(listener)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.signal.unsubscribe(id)
    }

    /// Whether this view observes `signal`
    pub fn observes(&self, signal: &Signal<T>) -> bool {
        self.signal.ptr_eq(signal)
    }
}

impl<T: fmt::Debug> fmt::Debug for ReadSignal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ReadSignal").field(&self.signal).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_clone_shares_cell() {
        let a = Signal::new(1u32);
        let b = a.clone();
        b.set(7);
        assert_eq!(a.get(), 7);
        assert!(a.ptr_eq(&b));
        assert!(!a.ptr_eq(&Signal::new(7)));
    }

    #[test]
    fn test_set_if_changed_skips_equal_values() {
        let signal = Signal::new("light".to_string());
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = calls.clone();
        signal.subscribe(move |_| {
            calls_clone.fetch_add(1, Ordering::SeqCst);
        });

        assert!(!signal.set_if_changed("light".to_string()));
        assert!(signal.set_if_changed("dark".to_string()));
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        // Plain set always notifies
        signal.set("dark".to_string());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_replace_defers_notification() {
        let signal = Signal::new(1);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();
        signal.subscribe(move |v| seen_clone.lock().unwrap().push(*v));

        assert_eq!(signal.replace(2), 1);
        assert_eq!(signal.replace(3), 2);
        assert!(seen.lock().unwrap().is_empty());

        signal.notify();
        assert_eq!(*seen.lock().unwrap(), vec![3]);
    }

    #[test]
    fn test_unsubscribe() {
        let signal = Signal::new(0);
        let id = signal.subscribe(|_| {});
        assert_eq!(signal.listener_count(), 1);
        assert!(signal.unsubscribe(id));
        assert!(!signal.unsubscribe(id));
        assert_eq!(signal.listener_count(), 0);
    }

    #[test]
    fn test_listener_can_read_and_write() {
        let source = Signal::new(1);
        let mirror = Signal::new(0);
        let source_clone = source.clone();
        let mirror_clone = mirror.clone();
        source.subscribe(move |_| {
            // Reading the signal being notified must not deadlock
            mirror_clone.set(source_clone.get() * 10);
        });

        source.set(4);
        assert_eq!(mirror.get(), 40);
    }

    #[test]
    fn test_read_only_view() {
        let signal = Signal::new(3);
        let view = signal.read_only();
        assert!(view.observes(&signal));
        signal.update(|v| v + 1);
        assert_eq!(view.get(), 4);
        assert_eq!(view.with(|v| v * 2), 8);
    }
}
