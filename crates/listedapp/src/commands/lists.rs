//! List CRUD.
//!
//! Soft delete and restore live in [`super::delete`] and [`super::restore`].
//! [`delete`] here is the permanent removal of a list that is already in the trash.

use chrono::{DateTime, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use super::{ensure_tag_exists, position_of, tagging};
use crate::error::{EntityKind, ListedError, Result};
use crate::model::{List, ListPatch, NewList};
use crate::store::repository::{Change, Repository};
use crate::store::EntityStore;
use crate::validation::{normalize_description, normalize_name};

/// All lists in stored (insertion) order, trashed ones included.
pub fn list_all<S: EntityStore>(repo: &Repository<S>) -> Result<Vec<List>> {
    repo.load()
}

pub fn get<S: EntityStore>(repo: &Repository<S>, id: Uuid) -> Result<List> {
    repo.load::<List>()?
        .into_iter()
        .find(|l| l.id == id)
        .ok_or_else(|| ListedError::not_found(EntityKind::List, id))
}

/// Create a list and attach the requested tags.
///
/// All tags must exist. They are checked before the list is written, so an
/// unknown tag leaves the store untouched. If the links cannot be written, the
/// new list is removed again and the link error is returned.
pub fn create<S: EntityStore>(
    repo: &Repository<S>,
    input: NewList,
    now: DateTime<Utc>,
) -> Result<List> {
    let name = normalize_name(EntityKind::List, &input.name)?;
    let description = normalize_description(input.description.as_deref());
    for tag_id in &input.tags {
        ensure_tag_exists(repo, *tag_id)?;
    }

    let list = List {
        id: repo.allocate_id(),
        name,
        description,
        created_at: now,
        updated_at: now,
        deleted_at: None,
    };

    let created = repo.mutate(|lists: &mut Vec<List>| {
        lists.push(list.clone());
        Ok(Change::Changed(list))
    })?;
    info!(list_id = %created.id, "list created");

    if !input.tags.is_empty() {
        if let Err(err) = tagging::attach_all(repo, created.id, &input.tags, now) {
            warn!(list_id = %created.id, error = %err, "tag links not saved, removing list");
            discard(repo, created.id)?;
            return Err(err);
        }
    }
    Ok(created)
}

fn discard<S: EntityStore>(repo: &Repository<S>, id: Uuid) -> Result<()> {
    repo.mutate(|lists: &mut Vec<List>| {
        let before = lists.len();
        lists.retain(|l| l.id != id);
        if lists.len() == before {
            Ok(Change::Unchanged(()))
        } else {
            Ok(Change::Changed(()))
        }
    })
}

/// Apply a partial update. Always refreshes `updated_at`.
pub fn update<S: EntityStore>(
    repo: &Repository<S>,
    id: Uuid,
    patch: ListPatch,
    now: DateTime<Utc>,
) -> Result<List> {
    let name = patch
        .name
        .as_deref()
        .map(|n| normalize_name(EntityKind::List, n))
        .transpose()?;

    repo.mutate(|lists: &mut Vec<List>| {
        let idx = position_of(lists, EntityKind::List, id, |l| l.id)?;
        let list = &mut lists[idx];
        if let Some(name) = name {
            list.name = name;
        }
        if let Some(description) = patch.description {
            list.description = normalize_description(description.as_deref());
        }
        list.updated_at = now;
        Ok(Change::Changed(list.clone()))
    })
}

/// Permanently delete a trashed list.
///
/// An active list must go through the trash first; for it this fails with
/// `NotFound`. Items and tag links of the list are left in place.
pub fn delete<S: EntityStore>(repo: &Repository<S>, id: Uuid) -> Result<List> {
    let removed = repo.mutate(|lists: &mut Vec<List>| {
        let idx = position_of(lists, EntityKind::List, id, |l| l.id)?;
        if lists[idx].is_active() {
            return Err(ListedError::not_found(EntityKind::List, id));
        }
        Ok(Change::Changed(lists.remove(idx)))
    })?;
    info!(list_id = %id, "list permanently deleted");
    Ok(removed)
}
