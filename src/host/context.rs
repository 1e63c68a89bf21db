//! Ancestor-to-descendant context values.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A single provided context value.
pub type ContextEntry = (String, Arc<dyn Any + Send + Sync>);

/// Immutable string-keyed map visible to a node and its whole subtree.
///
/// Cloning is cheap; layering new entries with [`Context::extend`] leaves
/// the ancestor's context untouched.
#[derive(Clone, Default)]
pub struct Context {
    entries: Arc<HashMap<String, Arc<dyn Any + Send + Sync>>>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&Arc<dyn Any + Send + Sync>> {
        self.entries.get(key)
    }

    /// Typed lookup. `None` when the key is absent or holds another type.
    pub fn get_as<T: Any>(&self, key: &str) -> Option<&T> {
        self.entries.get(key)?.downcast_ref::<T>()
    }

    /// A new context with `entries` layered over this one.
    pub fn extend(&self, entries: &[ContextEntry]) -> Context {
        if entries.is_empty() {
            return self.clone();
        }
        let mut map = (*self.entries).clone();
        for (key, value) in entries {
            map.insert(key.clone(), Arc::clone(value));
        }
        Context {
            entries: Arc::new(map),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        keys.sort_unstable();
        f.debug_struct("Context").field("keys", &keys).finish()
    }
}
