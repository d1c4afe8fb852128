//! Tag management commands.
//!
//! - `list_all`: All tags
//! - `create`: Create a tag (color defaults to `#8BA89C`)
//! - `update`: Rename or recolor a tag
//! - `delete`: Hard-delete a tag
//!
//! Deleting a tag does not touch `listTags`: links pointing at it are left
//! dangling. Lookups through [`super::tagging`] skip them because they only
//! return tags that still exist.

use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use super::position_of;
use crate::error::{EntityKind, ListedError, Result};
use crate::model::{NewTag, Tag, TagPatch};
use crate::store::repository::{Change, Repository};
use crate::store::EntityStore;
use crate::validation::{normalize_color, normalize_name};

pub fn list_all<S: EntityStore>(repo: &Repository<S>) -> Result<Vec<Tag>> {
    repo.load()
}

pub fn get<S: EntityStore>(repo: &Repository<S>, id: Uuid) -> Result<Tag> {
    repo.load::<Tag>()?
        .into_iter()
        .find(|t| t.id == id)
        .ok_or_else(|| ListedError::not_found(EntityKind::Tag, id))
}

pub fn create<S: EntityStore>(
    repo: &Repository<S>,
    input: NewTag,
    now: DateTime<Utc>,
) -> Result<Tag> {
    let name = normalize_name(EntityKind::Tag, &input.name)?;
    let color = normalize_color(input.color.as_deref())?;

    let tag = Tag {
        id: repo.allocate_id(),
        name,
        color,
        created_at: now,
        updated_at: now,
    };

    let created = repo.mutate(|tags: &mut Vec<Tag>| {
        tags.push(tag.clone());
        Ok(Change::Changed(tag))
    })?;
    info!(tag_id = %created.id, name = %created.name, "tag created");
    Ok(created)
}

pub fn update<S: EntityStore>(
    repo: &Repository<S>,
    id: Uuid,
    patch: TagPatch,
    now: DateTime<Utc>,
) -> Result<Tag> {
    let name = patch
        .name
        .as_deref()
        .map(|n| normalize_name(EntityKind::Tag, n))
        .transpose()?;
    let color = patch
        .color
        .as_deref()
        .map(|c| normalize_color(Some(c)))
        .transpose()?;

    repo.mutate(|tags: &mut Vec<Tag>| {
        let idx = position_of(tags, EntityKind::Tag, id, |t| t.id)?;
        let tag = &mut tags[idx];
        if let Some(name) = name {
            tag.name = name;
        }
        if let Some(color) = color {
            tag.color = color;
        }
        tag.updated_at = now;
        Ok(Change::Changed(tag.clone()))
    })
}

pub fn delete<S: EntityStore>(repo: &Repository<S>, id: Uuid) -> Result<Tag> {
    let removed = repo.mutate(|tags: &mut Vec<Tag>| {
        let idx = position_of(tags, EntityKind::Tag, id, |t| t.id)?;
        Ok(Change::Changed(tags.remove(idx)))
    })?;
    info!(tag_id = %id, "tag deleted");
    Ok(removed)
}
