//! Minimal component host.
//!
//! Supplies what the binding layer needs from a UI framework: a tree of
//! stateful nodes with mount/update/unmount hooks, ancestor-to-descendant
//! context, a coalescing update scheduler and reference callbacks. It does
//! no diffing beyond positional type matching and no rendering of its own.
//!
//! # Architecture
//!
//! ```text
//! Host::render(Element) ──→ mount / update ──→ Component::render ──→ children
//!        ↑                                                              │
//! Host::flush() ←── UpdateQueue ←── Scheduler::schedule_update ←────────┘
//! ```

mod component;
mod context;
mod element;
mod scheduler;
mod tree;

pub use component::{AsAny, Component, ComponentType, Scope};
pub use context::{Context, ContextEntry};
pub use element::{Element, NodeRef};
pub use scheduler::{InstanceId, Scheduler, UpdateQueue};
pub use tree::Host;
