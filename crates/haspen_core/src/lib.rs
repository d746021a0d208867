//! Haspen Core Runtime
//!
//! Foundational primitives shared by the Haspen UI crates:
//!
//! - **Reactive Signals**: shared observable cells with synchronous listeners
//! - **Context Scopes**: tree-scoped dependency injection where the nearest
//!   provider wins
//!
//! # Example
//!
//! ```rust
//! use haspen_core::{ContextScope, InjectionKey, Signal};
//! use std::sync::Arc;
//!
//! static COUNT: InjectionKey<Signal<i32>> = InjectionKey::new("example.count");
//!
//! let root = ContextScope::root();
//! root.provide(&COUNT, Arc::new(Signal::new(0)));
//!
//! // A descendant finds the same signal and writes through it
//! let child = root.child();
//! let count = child.inject(&COUNT).unwrap();
//! count.set(5);
//!
//! assert_eq!(root.inject(&COUNT).unwrap().get(), 5);
//! ```

pub mod context;
pub mod signal;

pub use context::{ContextKey, ContextScope, InjectionKey};
pub use signal::{ReadSignal, Signal, SubscriptionId};
