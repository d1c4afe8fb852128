//! # Storage Layer
//!
//! listed persists each record kind as one JSON array under a fixed key, the
//! way a device-local key-value store (AsyncStorage and friends) is used:
//!
//! | Key           | Contents                    |
//! |---------------|-----------------------------|
//! | `lists`       | `[List]`                    |
//! | `items`       | `[Item]`                    |
//! | `tags`        | `[Tag]`                     |
//! | `listTags`    | `[ListTagLink]`             |
//! | `preferences` | `[Preferences]` (0 or 1)    |
//!
//! ## Layers
//!
//! - [`EntityStore`]: raw string I/O per key. Knows nothing about records.
//! - [`repository::Repository`]: typed collections on top of a store. Owns
//!   (de)serialization, id allocation and write serialization.
//!
//! ## Whole-Collection Writes
//!
//! A store can only replace a key's value wholesale. Every mutation is therefore
//! a read-modify-write of an entire collection, and two unsynchronized writers
//! to the same key would lose one of the updates. The repository holds one
//! write lock per collection around each cycle. Reads take no lock; backends
//! make `set` atomic so a reader sees either the old or the new array.
//!
//! ## Implementations
//!
//! - [`mem_backend::MemBackend`]: in-process map, for tests and ephemeral hosts.
//! - [`fs_backend::FsBackend`]: one `<key>.json` file per collection, written
//!   via temp file + rename.

use std::fmt;

use crate::error::StoreError;

pub mod fs_backend;
pub mod mem_backend;
pub mod repository;

/// The named collections kept in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Lists,
    Items,
    Tags,
    ListTags,
    Preferences,
}

impl Collection {
    pub const ALL: [Collection; 5] = [
        Collection::Lists,
        Collection::Items,
        Collection::Tags,
        Collection::ListTags,
        Collection::Preferences,
    ];

    /// Storage key of the collection.
    pub fn key(self) -> &'static str {
        match self {
            Collection::Lists => "lists",
            Collection::Items => "items",
            Collection::Tags => "tags",
            Collection::ListTags => "listTags",
            Collection::Preferences => "preferences",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Abstract key-value store holding one serialized collection per key.
///
/// Implementations must be safe to share between threads. `set` must be
/// atomic: on failure the previous value stays in place.
pub trait EntityStore: Send + Sync {
    /// Serialized contents of a collection, or `None` if it was never written.
    fn get(&self, collection: Collection) -> Result<Option<String>, StoreError>;

    /// Replace the serialized contents of a collection.
    fn set(&self, collection: Collection, value: &str) -> Result<(), StoreError>;
}

impl<T: EntityStore + ?Sized> EntityStore for std::sync::Arc<T> {
    fn get(&self, collection: Collection) -> Result<Option<String>, StoreError> {
        (**self).get(collection)
    }

    fn set(&self, collection: Collection, value: &str) -> Result<(), StoreError> {
        (**self).set(collection, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_keys_match_stored_names() {
        let keys: Vec<&str> = Collection::ALL.iter().map(|c| c.key()).collect();
        assert_eq!(keys, vec!["lists", "items", "tags", "listTags", "preferences"]);
        assert_eq!(Collection::ListTags.to_string(), "listTags");
    }
}
