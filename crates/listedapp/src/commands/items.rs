//! Item CRUD.
//!
//! Items reference their list by id. The list must exist when the item is
//! created; nothing cascades when the list is later trashed or purged.

use chrono::{DateTime, Utc};
use rand::seq::IndexedRandom;
use rand::Rng;
use tracing::{debug, info};
use uuid::Uuid;

use super::{ensure_list_exists, position_of};
use crate::error::{EntityKind, ListedError, Result};
use crate::model::{Item, ItemPatch, NewItem};
use crate::store::repository::{Change, Repository};
use crate::store::EntityStore;
use crate::validation::{normalize_description, normalize_name};

pub fn list_all<S: EntityStore>(repo: &Repository<S>) -> Result<Vec<Item>> {
    repo.load()
}

/// Items belonging to `list_id`, in insertion order.
pub fn for_list<S: EntityStore>(repo: &Repository<S>, list_id: Uuid) -> Result<Vec<Item>> {
    Ok(repo
        .load::<Item>()?
        .into_iter()
        .filter(|i| i.list_id == list_id)
        .collect())
}

pub fn get<S: EntityStore>(repo: &Repository<S>, id: Uuid) -> Result<Item> {
    repo.load::<Item>()?
        .into_iter()
        .find(|i| i.id == id)
        .ok_or_else(|| ListedError::not_found(EntityKind::Item, id))
}

pub fn create<S: EntityStore>(
    repo: &Repository<S>,
    input: NewItem,
    now: DateTime<Utc>,
) -> Result<Item> {
    let name = normalize_name(EntityKind::Item, &input.name)?;
    ensure_list_exists(repo, input.list_id)?;

    let item = Item {
        id: repo.allocate_id(),
        list_id: input.list_id,
        name,
        description: normalize_description(input.description.as_deref()),
        completed: false,
        created_at: now,
        updated_at: now,
    };

    let created = repo.mutate(|items: &mut Vec<Item>| {
        items.push(item.clone());
        Ok(Change::Changed(item))
    })?;
    info!(item_id = %created.id, list_id = %created.list_id, "item created");
    Ok(created)
}

pub fn update<S: EntityStore>(
    repo: &Repository<S>,
    id: Uuid,
    patch: ItemPatch,
    now: DateTime<Utc>,
) -> Result<Item> {
    let name = patch
        .name
        .as_deref()
        .map(|n| normalize_name(EntityKind::Item, n))
        .transpose()?;

    repo.mutate(|items: &mut Vec<Item>| {
        let idx = position_of(items, EntityKind::Item, id, |i| i.id)?;
        let item = &mut items[idx];
        if let Some(name) = name {
            item.name = name;
        }
        if let Some(description) = patch.description {
            item.description = normalize_description(description.as_deref());
        }
        if let Some(completed) = patch.completed {
            item.completed = completed;
        }
        item.updated_at = now;
        debug!(item_id = %id, completed = item.completed, "item updated");
        Ok(Change::Changed(item.clone()))
    })
}

/// Flip the completion flag.
pub fn toggle<S: EntityStore>(repo: &Repository<S>, id: Uuid, now: DateTime<Utc>) -> Result<Item> {
    repo.mutate(|items: &mut Vec<Item>| {
        let idx = position_of(items, EntityKind::Item, id, |i| i.id)?;
        let item = &mut items[idx];
        item.completed = !item.completed;
        item.updated_at = now;
        Ok(Change::Changed(item.clone()))
    })
}

pub fn delete<S: EntityStore>(repo: &Repository<S>, id: Uuid) -> Result<Item> {
    let removed = repo.mutate(|items: &mut Vec<Item>| {
        let idx = position_of(items, EntityKind::Item, id, |i| i.id)?;
        Ok(Change::Changed(items.remove(idx)))
    })?;
    info!(item_id = %id, "item deleted");
    Ok(removed)
}

/// A uniformly random uncompleted item of the list, or `None` if every
/// item is completed (or the list has none).
pub fn random_uncompleted<S: EntityStore, R: Rng + ?Sized>(
    repo: &Repository<S>,
    list_id: Uuid,
    rng: &mut R,
) -> Result<Option<Item>> {
    let open: Vec<Item> = for_list(repo, list_id)?
        .into_iter()
        .filter(|i| !i.completed)
        .collect();
    Ok(open.choose(rng).cloned())
}
