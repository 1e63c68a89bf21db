//! Store subscription owned by a mounted connector.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::host::{InstanceId, Scheduler};
use crate::store::{StoreHandle, Unsubscribe};

/// Store subscription that requests a re-render of one instance per
/// notification.
///
/// Released exactly once, on [`Subscription::release`] or drop. After
/// release the listener schedules nothing, even if the store still holds it
/// and keeps calling it.
pub struct Subscription {
    active: Arc<AtomicBool>,
    unsubscribe: Option<Unsubscribe>,
}

impl Subscription {
    pub fn new<S>(store: &StoreHandle<S>, scheduler: Arc<dyn Scheduler>, instance: InstanceId) -> Self {
        let active = Arc::new(AtomicBool::new(true));
        let listening = Arc::clone(&active);
        let unsubscribe = store.subscribe(Arc::new(move || {
            if listening.load(Ordering::SeqCst) {
                scheduler.schedule_update(instance);
            }
        }));

        Self {
            active,
            unsubscribe: Some(unsubscribe),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    pub fn release(&mut self) {
        self.active.store(false, Ordering::SeqCst);
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe.call();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}
