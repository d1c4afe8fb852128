use super::{Collection, EntityStore};
use crate::error::StoreError;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError, RwLock};

/// In-memory storage backend.
///
/// Thread-safe so it can back a shared repository in concurrency tests.
/// Each `set` replaces a collection's value under the map's write lock,
/// which makes it atomic with respect to readers.
#[derive(Default)]
pub struct MemBackend {
    data: RwLock<HashMap<Collection, String>>,
    simulate_write_error: AtomicBool,
    failing_collection: Mutex<Option<Collection>>,
    writes: AtomicUsize,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.store(simulate, Ordering::SeqCst);
    }

    /// Fail writes to one collection only, leaving the others writable.
    pub fn set_simulate_write_error_for(&self, collection: Option<Collection>) {
        *self
            .failing_collection
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = collection;
    }

    /// Number of successful `set` calls so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Raw stored value, bypassing the repository.
    pub fn raw(&self, collection: Collection) -> Option<String> {
        self.data
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&collection)
            .cloned()
    }
}

impl EntityStore for MemBackend {
    fn get(&self, collection: Collection) -> Result<Option<String>, StoreError> {
        Ok(self.raw(collection))
    }

    fn set(&self, collection: Collection, value: &str) -> Result<(), StoreError> {
        let failing = *self
            .failing_collection
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if self.simulate_write_error.load(Ordering::SeqCst) || failing == Some(collection) {
            return Err(StoreError::Backend("Simulated write error".to_string()));
        }
        self.data
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(collection, value.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
