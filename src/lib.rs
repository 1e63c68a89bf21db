//! Binds a component tree to an observable state store.
//!
//! [`provider`] makes a store reachable from a subtree; [`connect`] wraps a
//! component so each instance receives props derived from the store's state
//! and dispatcher, merged over its own props, and re-renders whenever the
//! store notifies. Re-render requests go through the host's coalescing
//! [`host::UpdateQueue`] and are applied by [`host::Host::flush`].

pub mod binding;
pub mod config;
pub mod error;
pub mod host;
pub mod logging;
pub mod props;
pub mod store;

pub use binding::{connect, merge_props, provider, Connect};
pub use error::Error;
pub use host::{Component, ComponentType, Element, Host};
pub use props::{Action, Dispatch, Props};
pub use store::{ReducerStore, StateStore, StoreHandle};
