use super::{Collection, EntityStore};
use crate::error::{ListedError, Result};
use crate::model::{Item, List, ListTagLink, Tag};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::{Mutex, PoisonError};
use tracing::{debug, warn};
use uuid::Uuid;

/// A record type stored as one collection.
pub trait Record: Serialize + DeserializeOwned {
    const COLLECTION: Collection;
}

impl Record for List {
    const COLLECTION: Collection = Collection::Lists;
}

impl Record for Item {
    const COLLECTION: Collection = Collection::Items;
}

impl Record for Tag {
    const COLLECTION: Collection = Collection::Tags;
}

impl Record for ListTagLink {
    const COLLECTION: Collection = Collection::ListTags;
}

/// What a mutation did to the in-memory copy of a collection.
///
/// `Unchanged` skips the write entirely, so no-op mutations never touch the store.
#[derive(Debug)]
pub enum Change<T> {
    Changed(T),
    Unchanged(T),
}

#[derive(Default)]
struct WriteLocks {
    lists: Mutex<()>,
    items: Mutex<()>,
    tags: Mutex<()>,
    list_tags: Mutex<()>,
    preferences: Mutex<()>,
}

impl WriteLocks {
    fn for_collection(&self, collection: Collection) -> &Mutex<()> {
        match collection {
            Collection::Lists => &self.lists,
            Collection::Items => &self.items,
            Collection::Tags => &self.tags,
            Collection::ListTags => &self.list_tags,
            Collection::Preferences => &self.preferences,
        }
    }
}

/// Typed access to the collections of an [`EntityStore`].
///
/// Mutations go through [`Repository::mutate`], which serializes writers per
/// collection. Loads take no lock.
pub struct Repository<S: EntityStore> {
    store: S,
    locks: WriteLocks,
    pretty_json: bool,
}

impl<S: EntityStore> Repository<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            locks: WriteLocks::default(),
            pretty_json: false,
        }
    }

    pub fn with_pretty_json(mut self, pretty: bool) -> Self {
        self.pretty_json = pretty;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// A fresh identifier for a new record.
    pub fn allocate_id(&self) -> Uuid {
        Uuid::new_v4()
    }

    /// Load a whole collection. A collection that was never written is empty.
    pub fn load<R: Record>(&self) -> Result<Vec<R>> {
        self.load_raw(R::COLLECTION)
    }

    /// Run a read-modify-write cycle over one collection.
    ///
    /// The closure gets the current contents. If it returns an error or
    /// [`Change::Unchanged`], nothing is written. Otherwise the whole collection
    /// is persisted in one `set`. Concurrent mutations of the same collection
    /// run one after another.
    pub fn mutate<R, T, F>(&self, f: F) -> Result<T>
    where
        R: Record,
        F: FnOnce(&mut Vec<R>) -> Result<Change<T>>,
    {
        let collection = R::COLLECTION;
        let _guard = self
            .locks
            .for_collection(collection)
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let mut records = self.load_raw::<R>(collection)?;
        match f(&mut records)? {
            Change::Unchanged(value) => Ok(value),
            Change::Changed(value) => {
                self.persist(collection, &records)?;
                debug!(%collection, count = records.len(), "collection saved");
                Ok(value)
            }
        }
    }

    fn load_raw<R: DeserializeOwned>(&self, collection: Collection) -> Result<Vec<R>> {
        match self.store.get(collection)? {
            None => Ok(Vec::new()),
            Some(raw) if raw.trim().is_empty() => Ok(Vec::new()),
            Some(raw) => serde_json::from_str(&raw).map_err(|err| {
                warn!(%collection, error = %err, "stored collection is not valid JSON");
                ListedError::from(err)
            }),
        }
    }

    fn persist<R: Serialize>(&self, collection: Collection, records: &[R]) -> Result<()> {
        let encoded = if self.pretty_json {
            serde_json::to_string_pretty(records)?
        } else {
            serde_json::to_string(records)?
        };
        self.store.set(collection, &encoded).map_err(|err| {
            warn!(%collection, error = %err, "failed to write collection");
            ListedError::from(err)
        })
    }
}
