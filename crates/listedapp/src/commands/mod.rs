//! # Command Layer
//!
//! This module contains the **business logic** of listed. Each concern lives in
//! its own submodule as plain functions over a [`Repository`].
//!
//! ## Role and Responsibilities
//!
//! Commands:
//! - Validate and normalize input
//! - Assign ids and stamp timestamps on new records
//! - Apply lifecycle rules (soft delete, restore, purge) and link uniqueness
//! - Return the records they produced or touched
//!
//! ## What Commands Do NOT Do
//!
//! - **Own time**: the current time is passed in by the caller (the API facade
//!   reads it from its [`crate::clock::Clock`])
//! - **Presentation**: no messages, formatting, or dialogs
//! - **Push notifications**: callers re-read after a successful mutation
//!
//! ## Atomicity
//!
//! Each [`Repository::mutate`] cycle touches one collection, so a failing
//! cycle leaves that collection exactly as it was. A command that writes two
//! collections (creating a list with tags) undoes its first write when the
//! second one fails.
//!
//! ## Command Modules
//!
//! - [`lists`]: List CRUD and permanent deletion from the trash
//! - [`items`]: Item CRUD, completion toggling, random pick
//! - [`tags`]: Tag CRUD
//! - [`delete`]: Move a list to the trash
//! - [`restore`]: Bring a list back from the trash
//! - [`purge`]: Remove lists whose retention window has elapsed
//! - [`tagging`]: List/tag links
//! - [`preferences`]: Persisted user preferences

use crate::error::{EntityKind, ListedError, Result};
use crate::store::repository::Repository;
use crate::store::EntityStore;
use uuid::Uuid;

pub mod delete;
pub mod items;
pub mod lists;
pub mod preferences;
pub mod purge;
pub mod restore;
pub mod tagging;
pub mod tags;

/// Position of the record with `id`, or `NotFound`.
pub(crate) fn position_of<R>(
    records: &[R],
    kind: EntityKind,
    id: Uuid,
    id_of: impl Fn(&R) -> Uuid,
) -> Result<usize> {
    records
        .iter()
        .position(|r| id_of(r) == id)
        .ok_or_else(|| ListedError::not_found(kind, id))
}

/// Fails with `NotFound` unless a list with `id` exists (in any state).
pub(crate) fn ensure_list_exists<S: EntityStore>(repo: &Repository<S>, id: Uuid) -> Result<()> {
    let lists = repo.load::<crate::model::List>()?;
    position_of(&lists, EntityKind::List, id, |l| l.id).map(|_| ())
}

pub(crate) fn ensure_tag_exists<S: EntityStore>(repo: &Repository<S>, id: Uuid) -> Result<()> {
    let tags = repo.load::<crate::model::Tag>()?;
    position_of(&tags, EntityKind::Tag, id, |t| t.id).map(|_| ())
}
