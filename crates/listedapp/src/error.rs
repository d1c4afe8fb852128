use std::fmt;

use thiserror::Error;
use uuid::Uuid;

/// The kind of record an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    List,
    Item,
    Tag,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::List => "List",
            EntityKind::Item => "Item",
            EntityKind::Tag => "Tag",
        };
        f.write_str(name)
    }
}

/// Failures of the underlying entity store.
///
/// These are never retried; the call that hit them fails and the stored
/// collection keeps its previous contents.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Backend(String),
}

#[derive(Error, Debug)]
pub enum ListedError {
    /// The id does not exist, or not in the state the operation requires.
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: Uuid },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Config error: {0}")]
    Config(String),
}

impl ListedError {
    pub fn not_found(kind: EntityKind, id: Uuid) -> Self {
        ListedError::NotFound { kind, id }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ListedError::NotFound { .. })
    }
}

impl From<std::io::Error> for ListedError {
    fn from(err: std::io::Error) -> Self {
        ListedError::Store(StoreError::Io(err))
    }
}

impl From<serde_json::Error> for ListedError {
    fn from(err: serde_json::Error) -> Self {
        ListedError::Store(StoreError::Serialization(err))
    }
}

pub type Result<T> = std::result::Result<T, ListedError>;
