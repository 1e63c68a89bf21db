//! Observable state stores.
//!
//! The binding layer only consumes the [`StateStore`] interface. A small
//! reducer-driven implementation, [`ReducerStore`], is provided for
//! applications that do not bring their own.
//!
//! # Architecture
//!
//! ```text
//! Action ──→ Reducer ──→ State ──→ Listeners
//!    ↑                                 │
//!    └──────── connected components ───┘
//! ```

mod reducer;
mod reducer_store;
mod state_store;

pub use reducer::Reducer;
pub use reducer_store::ReducerStore;
pub use state_store::{Listener, StateStore, StoreHandle, Unsubscribe};
