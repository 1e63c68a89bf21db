//! In-memory reference store driven by a [`Reducer`].

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::{Mutex, RwLock};

use crate::props::{Action, Dispatch};
use crate::store::reducer::Reducer;
use crate::store::state_store::{Listener, StateStore, StoreHandle, Unsubscribe};

/// Thread-safe store holding the latest state produced by `R`.
///
/// Readers share the current state through an `Arc` snapshot; `dispatch`
/// swaps in the reduced state and then notifies listeners synchronously,
/// outside of any lock, so a listener may read state or dispatch again.
pub struct ReducerStore<R: Reducer> {
    inner: Arc<StoreInner<R>>,
}

struct StoreInner<R: Reducer> {
    state: RwLock<Arc<R::State>>,
    listeners: Mutex<Vec<(u64, Listener)>>,
    next_listener_id: AtomicU64,
    dispatcher: Dispatch,
}

impl<R: Reducer> Clone for ReducerStore<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: Reducer> ReducerStore<R> {
    pub fn new(initial: R::State) -> Self {
        let inner = Arc::new_cyclic(|weak: &Weak<StoreInner<R>>| {
            let weak = weak.clone();
            StoreInner {
                state: RwLock::new(Arc::new(initial)),
                listeners: Mutex::new(Vec::new()),
                next_listener_id: AtomicU64::new(0),
                dispatcher: Dispatch::new(move |action| {
                    if let Some(inner) = weak.upgrade() {
                        inner.dispatch(action);
                    }
                }),
            }
        });
        Self { inner }
    }

    /// Share this store as a type-erased handle for [`crate::provider`].
    pub fn handle(&self) -> StoreHandle<R::State> {
        Arc::new(self.clone())
    }

    /// Number of currently registered listeners.
    pub fn listener_count(&self) -> usize {
        self.inner.listeners.lock().len()
    }
}

impl<R: Reducer> StoreInner<R> {
    fn dispatch(&self, action: Action) {
        {
            let mut state = self.state.write();
            let next = R::reduce(&**state, &action);
            *state = Arc::new(next);
        }

        let listeners: Vec<Listener> = self
            .listeners
            .lock()
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();

        tracing::trace!(listeners = listeners.len(), "Store notifying listeners");
        for listener in listeners {
            listener();
        }
    }
}

impl<R: Reducer> StateStore<R::State> for ReducerStore<R> {
    fn state(&self) -> Arc<R::State> {
        Arc::clone(&*self.inner.state.read())
    }

    fn dispatch(&self, action: Action) {
        self.inner.dispatch(action);
    }

    fn dispatcher(&self) -> Dispatch {
        self.inner.dispatcher.clone()
    }

    fn subscribe(&self, listener: Listener) -> Unsubscribe {
        let id = self.inner.next_listener_id.fetch_add(1, Ordering::Relaxed);
        self.inner.listeners.lock().push((id, listener));

        let weak = Arc::downgrade(&self.inner);
        Unsubscribe::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.listeners.lock().retain(|(listener_id, _)| *listener_id != id);
            }
        })
    }
}
