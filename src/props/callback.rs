//! Function-valued props.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

/// Store actions are plain JSON objects, e.g. `{"type": "increment"}`.
pub type Action = Value;

/// Handle to a store's dispatch function.
///
/// Cloning shares the underlying function; two handles are the same
/// dispatcher exactly when [`Dispatch::ptr_eq`] holds.
#[derive(Clone)]
pub struct Dispatch {
    inner: Arc<dyn Fn(Action) + Send + Sync>,
}

impl Dispatch {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Action) + Send + Sync + 'static,
    {
        Self { inner: Arc::new(f) }
    }

    pub fn call(&self, action: Action) {
        (self.inner)(action)
    }

    pub fn ptr_eq(&self, other: &Dispatch) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Dispatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Dispatch({:p})", Arc::as_ptr(&self.inner))
    }
}

/// Arbitrary function prop taking positional JSON arguments.
#[derive(Clone)]
pub struct Callback {
    inner: Arc<dyn Fn(&[Value]) + Send + Sync>,
}

impl Callback {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&[Value]) + Send + Sync + 'static,
    {
        Self { inner: Arc::new(f) }
    }

    pub fn invoke(&self, args: &[Value]) {
        (self.inner)(args)
    }

    pub fn ptr_eq(&self, other: &Callback) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Callback({:p})", Arc::as_ptr(&self.inner))
    }
}
