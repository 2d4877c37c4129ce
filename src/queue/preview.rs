// pixform/src/queue/preview.rs
use std::collections::HashMap;
use std::sync::Arc;

/// Soft cap before the store starts complaining. The handle table
/// stands in for a limited process-wide resource, so leaks show up in
/// the log long before they hurt.
const SOFT_CAPACITY: usize = 512;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PreviewHandle(u64);

/// Handle table for per-item preview bytes. Handles are not garbage
/// collected: whoever inserts one must release it when the owning item
/// goes away.
pub struct PreviewStore {
    slots: HashMap<u64, Arc<Vec<u8>>>,
    next: u64,
}

impl PreviewStore {
    pub fn new() -> Self {
        Self {
            slots: HashMap::new(),
            next: 0,
        }
    }

    pub fn insert(&mut self, bytes: Arc<Vec<u8>>) -> PreviewHandle {
        self.next += 1;
        self.slots.insert(self.next, bytes);

        if self.slots.len() > SOFT_CAPACITY {
            log::warn!(
                "preview store holds {} handles; some were likely never released",
                self.slots.len()
            );
        }

        PreviewHandle(self.next)
    }

    pub fn get(&self, handle: PreviewHandle) -> Option<&Arc<Vec<u8>>> {
        self.slots.get(&handle.0)
    }

    pub fn release(&mut self, handle: PreviewHandle) -> bool {
        self.slots.remove(&handle.0).is_some()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl Default for PreviewStore {
    fn default() -> Self {
        Self::new()
    }
}
