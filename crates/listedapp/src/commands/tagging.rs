//! List/tag links.
//!
//! The `listTags` collection is the only record of which lists carry which
//! tags. It holds at most one link per `(list_id, tag_id)` pair.
//!
//! - `attach`: Link a list to a tag (idempotent)
//! - `detach`: Remove a link (absent link is a no-op)
//! - `set_list_tags`: Make a list's tag set exactly the given ids
//! - `tags_for_list` / `lists_for_tag`: Lookups in either direction
//! - `list_with_tags`: A list with its derived tag id array

use chrono::{DateTime, Utc};
use std::collections::HashSet;
use tracing::debug;
use uuid::Uuid;

use super::{ensure_list_exists, ensure_tag_exists, lists};
use crate::error::Result;
use crate::model::{List, ListTagLink, ListWithTags, Tag};
use crate::query;
use crate::store::repository::{Change, Repository};
use crate::store::EntityStore;

/// Link `list_id` to `tag_id`. Linking an already linked pair succeeds
/// without writing anything.
///
/// The list and tag are checked before the link is written, outside the
/// `listTags` lock. A list or tag removed in between leaves a dangling link,
/// which lookups skip.
pub fn attach<S: EntityStore>(
    repo: &Repository<S>,
    list_id: Uuid,
    tag_id: Uuid,
    now: DateTime<Utc>,
) -> Result<()> {
    attach_all(repo, list_id, &[tag_id], now).map(|_| ())
}

/// Link `list_id` to every tag in `tag_ids` in one write. Returns how many
/// links were added.
pub fn attach_all<S: EntityStore>(
    repo: &Repository<S>,
    list_id: Uuid,
    tag_ids: &[Uuid],
    now: DateTime<Utc>,
) -> Result<usize> {
    ensure_list_exists(repo, list_id)?;
    for tag_id in tag_ids {
        ensure_tag_exists(repo, *tag_id)?;
    }

    repo.mutate(|links: &mut Vec<ListTagLink>| {
        let mut added = 0;
        for &tag_id in tag_ids {
            if !links.iter().any(|l| l.is_pair(list_id, tag_id)) {
                links.push(ListTagLink {
                    list_id,
                    tag_id,
                    created_at: Some(now),
                });
                added += 1;
            }
        }
        debug!(%list_id, added, "tags attached");
        if added == 0 {
            Ok(Change::Unchanged(0))
        } else {
            Ok(Change::Changed(added))
        }
    })
}

/// Remove the link between `list_id` and `tag_id`, if any.
pub fn detach<S: EntityStore>(repo: &Repository<S>, list_id: Uuid, tag_id: Uuid) -> Result<()> {
    repo.mutate(|links: &mut Vec<ListTagLink>| {
        let before = links.len();
        links.retain(|l| !l.is_pair(list_id, tag_id));
        if links.len() == before {
            Ok(Change::Unchanged(()))
        } else {
            debug!(%list_id, %tag_id, "tag detached");
            Ok(Change::Changed(()))
        }
    })
}

/// Replace the tag set of a list: links to tags outside `tag_ids` are
/// removed, missing ones are added. Done in a single write.
pub fn set_list_tags<S: EntityStore>(
    repo: &Repository<S>,
    list_id: Uuid,
    tag_ids: &[Uuid],
    now: DateTime<Utc>,
) -> Result<()> {
    ensure_list_exists(repo, list_id)?;
    for tag_id in tag_ids {
        ensure_tag_exists(repo, *tag_id)?;
    }
    let wanted: HashSet<Uuid> = tag_ids.iter().copied().collect();

    repo.mutate(|links: &mut Vec<ListTagLink>| {
        let before = links.clone();
        links.retain(|l| l.list_id != list_id || wanted.contains(&l.tag_id));
        for &tag_id in tag_ids {
            if !links.iter().any(|l| l.is_pair(list_id, tag_id)) {
                links.push(ListTagLink {
                    list_id,
                    tag_id,
                    created_at: Some(now),
                });
            }
        }
        if *links == before {
            Ok(Change::Unchanged(()))
        } else {
            Ok(Change::Changed(()))
        }
    })
}

/// Tags linked to the list. Links to deleted tags are skipped.
pub fn tags_for_list<S: EntityStore>(repo: &Repository<S>, list_id: Uuid) -> Result<Vec<Tag>> {
    let links: Vec<ListTagLink> = repo.load()?;
    let tags: Vec<Tag> = repo.load()?;
    Ok(query::tags_for_list(&tags, &links, list_id))
}

/// Lists (active or trashed) linked to the tag. Links to purged lists are skipped.
pub fn lists_for_tag<S: EntityStore>(repo: &Repository<S>, tag_id: Uuid) -> Result<Vec<List>> {
    let links: Vec<ListTagLink> = repo.load()?;
    let lists: Vec<List> = repo.load()?;
    Ok(query::lists_for_tag(&lists, &links, tag_id))
}

pub fn list_with_tags<S: EntityStore>(repo: &Repository<S>, list_id: Uuid) -> Result<ListWithTags> {
    let list = lists::get(repo, list_id)?;
    let links: Vec<ListTagLink> = repo.load()?;
    Ok(ListWithTags {
        tags: query::tag_ids_for_list(&links, list.id),
        list,
    })
}
