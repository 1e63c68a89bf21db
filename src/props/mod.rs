//! Prop values passed from owners to components.
//!
//! Props are an ordered string-keyed map. Values are either plain data
//! (`serde_json::Value`) or functions: the store's raw [`Dispatch`] or an
//! arbitrary [`Callback`]. Function values compare by identity, so a test can
//! assert that a component received exactly the store's dispatcher.

mod callback;

use std::collections::btree_map;
use std::collections::BTreeMap;

use serde_json::Value;

pub use callback::{Action, Callback, Dispatch};

/// Key under which the default dispatch selector exposes the store's dispatcher.
pub const DISPATCH_PROP: &str = "dispatch";

/// A single prop value.
#[derive(Clone, Debug)]
pub enum Prop {
    Value(Value),
    Dispatch(Dispatch),
    Callback(Callback),
}

impl Prop {
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Prop::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_dispatch(&self) -> Option<&Dispatch> {
        match self {
            Prop::Dispatch(dispatch) => Some(dispatch),
            _ => None,
        }
    }

    pub fn as_callback(&self) -> Option<&Callback> {
        match self {
            Prop::Callback(callback) => Some(callback),
            _ => None,
        }
    }
}

/// Data compares by value, functions by identity.
impl PartialEq for Prop {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Prop::Value(a), Prop::Value(b)) => a == b,
            (Prop::Dispatch(a), Prop::Dispatch(b)) => a.ptr_eq(b),
            (Prop::Callback(a), Prop::Callback(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl From<Value> for Prop {
    fn from(value: Value) -> Self {
        Prop::Value(value)
    }
}

impl From<Dispatch> for Prop {
    fn from(dispatch: Dispatch) -> Self {
        Prop::Dispatch(dispatch)
    }
}

impl From<Callback> for Prop {
    fn from(callback: Callback) -> Self {
        Prop::Callback(callback)
    }
}

impl From<&str> for Prop {
    fn from(value: &str) -> Self {
        Prop::Value(Value::from(value))
    }
}

impl From<String> for Prop {
    fn from(value: String) -> Self {
        Prop::Value(Value::from(value))
    }
}

impl From<i32> for Prop {
    fn from(value: i32) -> Self {
        Prop::Value(Value::from(value))
    }
}

impl From<i64> for Prop {
    fn from(value: i64) -> Self {
        Prop::Value(Value::from(value))
    }
}

impl From<u64> for Prop {
    fn from(value: u64) -> Self {
        Prop::Value(Value::from(value))
    }
}

impl From<f64> for Prop {
    fn from(value: f64) -> Self {
        Prop::Value(Value::from(value))
    }
}

impl From<bool> for Prop {
    fn from(value: bool) -> Self {
        Prop::Value(Value::from(value))
    }
}

/// Ordered prop map.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Props {
    entries: BTreeMap<String, Prop>,
}

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Prop>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert a prop, returning the value it replaced.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Prop>) -> Option<Prop> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&Prop> {
        self.entries.get(key)
    }

    pub fn value(&self, key: &str) -> Option<&Value> {
        self.get(key).and_then(Prop::as_value)
    }

    pub fn callback(&self, key: &str) -> Option<&Callback> {
        self.get(key).and_then(Prop::as_callback)
    }

    /// The raw dispatcher injected by the default dispatch selector.
    pub fn dispatch(&self) -> Option<&Dispatch> {
        self.get(DISPATCH_PROP).and_then(Prop::as_dispatch)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Prop> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Copy every entry of `other` over `self`; colliding keys take `other`'s value.
    pub fn overlay(&mut self, other: Props) {
        self.entries.extend(other.entries);
    }
}

impl<K, V> FromIterator<(K, V)> for Props
where
    K: Into<String>,
    V: Into<Prop>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

impl IntoIterator for Props {
    type Item = (String, Prop);
    type IntoIter = btree_map::IntoIter<String, Prop>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
