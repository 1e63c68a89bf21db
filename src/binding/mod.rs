//! The `provider`/`connect` binding protocol.
//!
//! # Architecture
//!
//! ```text
//! provider(store) ──→ context["store"] ──→ Connector::will_mount ──→ subscribe
//!                                               │
//! store.dispatch ──→ listener ──→ UpdateQueue ──┘──→ Host::flush ──→ render(merge_props)
//! ```
//!
//! - **Provider**: injects the store into context on every render
//! - **Connector**: subscribes on mount, merges props on render, releases on unmount
//! - **Merge policy**: own < state-derived < dispatch-derived

mod connect;
mod merge;
mod provider;
mod selectors;
mod subscription;

pub use connect::{connect, Connect, Connector};
pub use merge::merge_props;
pub use provider::{provider, STORE_CONTEXT_KEY};
pub use selectors::{ActionCreator, ActionCreators, DispatchSelector, MapDispatch, StateSelector};
pub use subscription::Subscription;
