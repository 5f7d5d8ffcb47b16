use std::collections::HashMap;
use std::sync::{Arc, Mutex, Weak};

use crate::registry::event::ZoomChangeEvent;

pub(crate) type ListenerCallback = Arc<dyn Fn(&ZoomChangeEvent) + Send + Sync>;

/// Registration table behind a registry's change listeners.
///
/// Kept under its own lock, separate from the override maps, so listeners
/// can be added or dropped while a mutation is in flight.
#[derive(Default)]
pub(crate) struct ListenerTable {
    next_id: u64,
    callbacks: HashMap<u64, ListenerCallback>,
}

impl ListenerTable {
    pub(crate) fn insert(&mut self, callback: ListenerCallback) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.callbacks.insert(id, callback);
        id
    }

    pub(crate) fn remove(&mut self, id: u64) {
        self.callbacks.remove(&id);
    }

    /// Snapshot of the currently registered callbacks, so they can be
    /// invoked after the table lock is released.
    pub(crate) fn snapshot(&self) -> Vec<ListenerCallback> {
        self.callbacks.values().cloned().collect()
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.callbacks.len()
    }
}

/// Handle for a registered change listener.
///
/// Returned by
/// [`ZoomLevelRegistry::add_change_listener`](crate::registry::ZoomLevelRegistry::add_change_listener).
/// Dropping the handle unregisters the callback; notifications that begin
/// after the drop will not reach it. The handle holds only a weak
/// reference back to the registry's listener table, so it never keeps the
/// registry alive, and the registry never owns the subscriber.
pub struct ZoomSubscription {
    id: u64,
    table: Weak<Mutex<ListenerTable>>,
}

impl ZoomSubscription {
    pub(crate) fn new(id: u64, table: Weak<Mutex<ListenerTable>>) -> Self {
        Self { id, table }
    }

    /// Unregister explicitly instead of relying on scope end.
    pub fn unsubscribe(self) {}
}

impl Drop for ZoomSubscription {
    fn drop(&mut self) {
        if let Some(table) = self.table.upgrade() {
            table.lock().unwrap().remove(self.id);
        }
    }
}
