//! The store collaborator interface consumed by the binding layer.

use std::fmt;
use std::sync::Arc;

use crate::props::{Action, Dispatch};

/// Change listener registered with a store.
pub type Listener = Arc<dyn Fn() + Send + Sync>;

/// Shared, type-erased store reference as carried through context.
pub type StoreHandle<S> = Arc<dyn StateStore<S>>;

/// Observable state container.
///
/// Implementations notify every subscribed listener synchronously from
/// inside [`StateStore::dispatch`].
pub trait StateStore<S>: Send + Sync {
    /// Snapshot of the current state.
    fn state(&self) -> Arc<S>;

    /// Run an action through the store.
    fn dispatch(&self, action: Action);

    /// The store's dispatch function as a prop value.
    ///
    /// Must return the same handle (by [`Dispatch::ptr_eq`]) on every call.
    fn dispatcher(&self) -> Dispatch;

    /// Register a change listener.
    fn subscribe(&self, listener: Listener) -> Unsubscribe;
}

/// Releases a store subscription when called. Consumed by the call, so a
/// subscription cannot be released twice through the same handle.
pub struct Unsubscribe {
    release: Box<dyn FnOnce() + Send>,
}

impl Unsubscribe {
    pub fn new<F>(release: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            release: Box::new(release),
        }
    }

    /// A handle that releases nothing.
    pub fn noop() -> Self {
        Self::new(|| {})
    }

    pub fn call(self) {
        (self.release)()
    }
}

impl fmt::Debug for Unsubscribe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Unsubscribe")
    }
}
