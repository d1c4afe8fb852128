//! # Views
//!
//! Pure functions deriving what the app displays from a snapshot of the
//! stored collections. Nothing here touches the store; [`Snapshot::load`] is
//! the one place that reads it, and it takes the lists from the caller.
//!
//! ## Filtering
//!
//! - Trashed lists never appear in [`active_lists`] or [`filter_by_tag`].
//! - [`filter_by_tag`] with `None` means "all active lists".
//! - [`trash_view`] shows only lists that can still be restored: a list whose
//!   retention window has elapsed is hidden even before it is purged.
//!
//! ## Sorting
//!
//! [`sort_lists`] is stable: lists with equal keys keep their stored
//! (insertion) order.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::error::Result;
use crate::model::{Item, List, ListTagLink, ListWithTags, SortBy, Tag};
use crate::store::repository::Repository;
use crate::store::EntityStore;

/// Item counts for one list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListStats {
    pub total: usize,
    pub completed: usize,
}

impl ListStats {
    /// Completed share in percent, 0 for an empty list.
    pub fn progress(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.completed as f64 * 100.0 / self.total as f64
        }
    }
}

/// A restorable list and the whole days it has left.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrashEntry {
    pub list: List,
    pub days_remaining: i64,
}

/// Everything the home screen shows for one list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSummary {
    pub list: List,
    pub tags: Vec<Tag>,
    pub stats: ListStats,
}

pub fn active_lists(lists: &[List]) -> Vec<List> {
    lists.iter().filter(|l| l.is_active()).cloned().collect()
}

pub fn active_count(lists: &[List]) -> usize {
    lists.iter().filter(|l| l.is_active()).count()
}

/// Active lists carrying `tag_id`, or all active lists for `None`.
pub fn filter_by_tag(lists: &[List], links: &[ListTagLink], tag_id: Option<Uuid>) -> Vec<List> {
    match tag_id {
        None => active_lists(lists),
        Some(tag_id) => lists
            .iter()
            .filter(|l| l.is_active())
            .filter(|l| links.iter().any(|link| link.is_pair(l.id, tag_id)))
            .cloned()
            .collect(),
    }
}

pub fn sort_lists(mut lists: Vec<List>, sort_by: SortBy) -> Vec<List> {
    match sort_by {
        SortBy::Newest => lists.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortBy::Oldest => lists.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        SortBy::Name => lists.sort_by_cached_key(|l| l.name.to_lowercase()),
    }
    lists
}

pub fn stats_for_list(list_id: Uuid, items: &[Item]) -> ListStats {
    items
        .iter()
        .filter(|i| i.list_id == list_id)
        .fold(ListStats::default(), |mut stats, item| {
            stats.total += 1;
            if item.completed {
                stats.completed += 1;
            }
            stats
        })
}

/// Trashed lists that are still restorable at `now`, in stored order.
pub fn trash_view(lists: &[List], now: DateTime<Utc>) -> Vec<TrashEntry> {
    lists
        .iter()
        .filter_map(|list| {
            list.days_remaining(now)
                .filter(|days| *days > 0)
                .map(|days_remaining| TrashEntry {
                    list: list.clone(),
                    days_remaining,
                })
        })
        .collect()
}

/// Tag ids linked to a list, in link order, without duplicates.
pub fn tag_ids_for_list(links: &[ListTagLink], list_id: Uuid) -> Vec<Uuid> {
    let mut ids: Vec<Uuid> = Vec::new();
    for link in links.iter().filter(|l| l.list_id == list_id) {
        if !ids.contains(&link.tag_id) {
            ids.push(link.tag_id);
        }
    }
    ids
}

/// Existing tags linked to a list, in tag order.
pub fn tags_for_list(tags: &[Tag], links: &[ListTagLink], list_id: Uuid) -> Vec<Tag> {
    let ids = tag_ids_for_list(links, list_id);
    tags.iter().filter(|t| ids.contains(&t.id)).cloned().collect()
}

/// Existing lists (active or trashed) linked to a tag, in list order.
pub fn lists_for_tag(lists: &[List], links: &[ListTagLink], tag_id: Uuid) -> Vec<List> {
    lists
        .iter()
        .filter(|l| links.iter().any(|link| link.is_pair(l.id, tag_id)))
        .cloned()
        .collect()
}

/// Attach the derived tag id array to each list.
pub fn with_tags(lists: &[List], links: &[ListTagLink]) -> Vec<ListWithTags> {
    lists
        .iter()
        .map(|list| ListWithTags {
            list: list.clone(),
            tags: tag_ids_for_list(links, list.id),
        })
        .collect()
}

/// A point-in-time copy of all four collections.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub lists: Vec<List>,
    pub items: Vec<Item>,
    pub tags: Vec<Tag>,
    pub links: Vec<ListTagLink>,
}

impl Snapshot {
    /// Read items, tags and links around `lists` the caller already loaded.
    pub fn load<S: EntityStore>(repo: &Repository<S>, lists: Vec<List>) -> Result<Self> {
        Ok(Self {
            lists,
            items: repo.load()?,
            tags: repo.load()?,
            links: repo.load()?,
        })
    }

    /// Active lists, optionally narrowed to a tag, sorted, with their tags and stats.
    pub fn summaries(&self, tag_id: Option<Uuid>, sort_by: SortBy) -> Vec<ListSummary> {
        let lists = sort_lists(filter_by_tag(&self.lists, &self.links, tag_id), sort_by);
        lists
            .into_iter()
            .map(|list| ListSummary {
                tags: tags_for_list(&self.tags, &self.links, list.id),
                stats: stats_for_list(list.id, &self.items),
                list,
            })
            .collect()
    }
}
