//! Deferred update scheduling.

use std::collections::HashSet;
use std::fmt;

use parking_lot::Mutex;

/// Identifies a mounted component instance within a [`crate::host::Host`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(pub(crate) u64);

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Accepts requests to re-render an instance at the next flush.
pub trait Scheduler: Send + Sync {
    fn schedule_update(&self, id: InstanceId);
}

/// Coalescing queue of pending re-renders.
///
/// Requests for an instance that is already pending are folded into the
/// existing entry, so any number of notifications between two flushes
/// yields one re-render. Entries keep first-request order.
#[derive(Default)]
pub struct UpdateQueue {
    inner: Mutex<PendingUpdates>,
}

#[derive(Default)]
struct PendingUpdates {
    order: Vec<InstanceId>,
    queued: HashSet<InstanceId>,
    requests: u64,
}

impl UpdateQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().order.is_empty()
    }

    pub fn is_scheduled(&self, id: InstanceId) -> bool {
        self.inner.lock().queued.contains(&id)
    }

    /// Total schedule requests received, including coalesced ones.
    pub fn requests(&self) -> u64 {
        self.inner.lock().requests
    }

    /// Drop a pending request. Returns whether one was pending.
    pub fn cancel(&self, id: InstanceId) -> bool {
        let mut pending = self.inner.lock();
        if !pending.queued.remove(&id) {
            return false;
        }
        pending.order.retain(|queued| *queued != id);
        true
    }

    /// Take every pending request, in first-request order.
    pub fn drain(&self) -> Vec<InstanceId> {
        let mut pending = self.inner.lock();
        pending.queued.clear();
        std::mem::take(&mut pending.order)
    }
}

impl Scheduler for UpdateQueue {
    fn schedule_update(&self, id: InstanceId) {
        let mut pending = self.inner.lock();
        pending.requests += 1;
        if pending.queued.insert(id) {
            pending.order.push(id);
            tracing::trace!(instance = %id, "Update scheduled");
        }
    }
}
