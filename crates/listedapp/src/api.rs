//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point for a presentation layer.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Dispatches** to the appropriate command function
//! - **Supplies time** from its injected [`Clock`]
//! - **Purges lazily**: with `purge_on_load` set, every list load first
//!   removes trashed lists whose retention window has elapsed
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: That belongs in `commands/*.rs` and [`crate::query`]
//! - **Change notification**: callers re-read after a successful mutation
//!
//! ## Construction
//!
//! The store, clock and config are passed in; there is no global instance.
//!
//! - Production: `ListedApi::open(config)` (filesystem store, system clock)
//! - Testing: `ListedApi::new(MemBackend::new(), FixedClock::new(t), config)`
//!
//! `ListedApi` is `Sync` when its store is, so one instance can be shared
//! across threads; writes to the same collection are serialized by the
//! repository.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::clock::{Clock, SystemClock};
use crate::commands::preferences::{Preferences, PreferencesPatch};
use crate::commands::{delete, items, lists, preferences, purge, restore, tagging, tags};
use crate::config::ListedConfig;
use crate::error::Result;
use crate::model::{
    Item, ItemPatch, List, ListPatch, ListTagLink, ListWithTags, NewItem, NewList, NewTag, SortBy,
    Tag, TagPatch,
};
use crate::query::{self, ListStats, ListSummary, Snapshot, TrashEntry};
use crate::store::fs_backend::FsBackend;
use crate::store::repository::Repository;
use crate::store::EntityStore;

pub struct ListedApi<S: EntityStore, C: Clock = SystemClock> {
    repo: Repository<S>,
    clock: C,
    config: ListedConfig,
}

impl ListedApi<FsBackend, SystemClock> {
    /// Open the filesystem store in the configured data directory.
    pub fn open(config: ListedConfig) -> Result<Self> {
        let backend = FsBackend::new(config.resolve_data_dir()?);
        Ok(Self::new(backend, SystemClock, config))
    }
}

impl<S: EntityStore, C: Clock> ListedApi<S, C> {
    pub fn new(store: S, clock: C, config: ListedConfig) -> Self {
        let repo = Repository::new(store).with_pretty_json(config.pretty_json);
        Self {
            repo,
            clock,
            config,
        }
    }

    pub fn repository(&self) -> &Repository<S> {
        &self.repo
    }

    pub fn config(&self) -> &ListedConfig {
        &self.config
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    // --- Lists ---

    /// All lists (active and trashed) in stored order, after the lazy purge.
    pub fn lists(&self) -> Result<Vec<List>> {
        let all = lists::list_all(&self.repo)?;
        if !self.config.purge_on_load {
            return Ok(all);
        }
        let purged = purge::run(&self.repo, &all, self.now())?;
        if purged.is_empty() {
            Ok(all)
        } else {
            lists::list_all(&self.repo)
        }
    }

    pub fn list(&self, id: Uuid) -> Result<List> {
        lists::get(&self.repo, id)
    }

    pub fn list_with_tags(&self, id: Uuid) -> Result<ListWithTags> {
        tagging::list_with_tags(&self.repo, id)
    }

    pub fn lists_with_tags(&self) -> Result<Vec<ListWithTags>> {
        let all = self.lists()?;
        let links: Vec<ListTagLink> = self.repo.load()?;
        Ok(query::with_tags(&all, &links))
    }

    pub fn create_list(&self, input: NewList) -> Result<List> {
        lists::create(&self.repo, input, self.now())
    }

    pub fn update_list(&self, id: Uuid, patch: ListPatch) -> Result<List> {
        lists::update(&self.repo, id, patch, self.now())
    }

    /// Move a list to the trash.
    pub fn soft_delete_list(&self, id: Uuid) -> Result<List> {
        delete::run(&self.repo, id, self.now())
    }

    pub fn restore_list(&self, id: Uuid) -> Result<List> {
        restore::run(&self.repo, id, self.now())
    }

    /// Permanently delete a list that is in the trash.
    pub fn delete_list(&self, id: Uuid) -> Result<List> {
        lists::delete(&self.repo, id)
    }

    /// Remove every trashed list whose retention window has elapsed.
    pub fn purge_expired(&self) -> Result<Vec<Uuid>> {
        let all = lists::list_all(&self.repo)?;
        purge::run(&self.repo, &all, self.now())
    }

    /// Restorable lists with their remaining days.
    pub fn trash(&self) -> Result<Vec<TrashEntry>> {
        let all = self.lists()?;
        Ok(query::trash_view(&all, self.now()))
    }

    /// Active lists for the home screen. `sort_by` falls back to the stored
    /// preference.
    pub fn home(&self, tag_id: Option<Uuid>, sort_by: Option<SortBy>) -> Result<Vec<ListSummary>> {
        let sort_by = match sort_by {
            Some(sort_by) => sort_by,
            None => self.preferences()?.sort_by,
        };
        let snapshot = Snapshot::load(&self.repo, self.lists()?)?;
        Ok(snapshot.summaries(tag_id, sort_by))
    }

    pub fn active_list_count(&self) -> Result<usize> {
        Ok(query::active_count(&self.lists()?))
    }

    // --- Items ---

    pub fn items(&self, list_id: Uuid) -> Result<Vec<Item>> {
        items::for_list(&self.repo, list_id)
    }

    pub fn all_items(&self) -> Result<Vec<Item>> {
        items::list_all(&self.repo)
    }

    pub fn item(&self, id: Uuid) -> Result<Item> {
        items::get(&self.repo, id)
    }

    pub fn create_item(&self, input: NewItem) -> Result<Item> {
        items::create(&self.repo, input, self.now())
    }

    pub fn update_item(&self, id: Uuid, patch: ItemPatch) -> Result<Item> {
        items::update(&self.repo, id, patch, self.now())
    }

    pub fn toggle_item(&self, id: Uuid) -> Result<Item> {
        items::toggle(&self.repo, id, self.now())
    }

    pub fn delete_item(&self, id: Uuid) -> Result<Item> {
        items::delete(&self.repo, id)
    }

    pub fn random_uncompleted_item(&self, list_id: Uuid) -> Result<Option<Item>> {
        items::random_uncompleted(&self.repo, list_id, &mut rand::rng())
    }

    pub fn list_stats(&self, list_id: Uuid) -> Result<ListStats> {
        let all = items::list_all(&self.repo)?;
        Ok(query::stats_for_list(list_id, &all))
    }

    // --- Tags ---

    pub fn tags(&self) -> Result<Vec<Tag>> {
        tags::list_all(&self.repo)
    }

    pub fn tag(&self, id: Uuid) -> Result<Tag> {
        tags::get(&self.repo, id)
    }

    pub fn create_tag(&self, input: NewTag) -> Result<Tag> {
        tags::create(&self.repo, input, self.now())
    }

    pub fn update_tag(&self, id: Uuid, patch: TagPatch) -> Result<Tag> {
        tags::update(&self.repo, id, patch, self.now())
    }

    pub fn delete_tag(&self, id: Uuid) -> Result<Tag> {
        tags::delete(&self.repo, id)
    }

    pub fn attach_tag(&self, list_id: Uuid, tag_id: Uuid) -> Result<()> {
        tagging::attach(&self.repo, list_id, tag_id, self.now())
    }

    pub fn detach_tag(&self, list_id: Uuid, tag_id: Uuid) -> Result<()> {
        tagging::detach(&self.repo, list_id, tag_id)
    }

    pub fn set_list_tags(&self, list_id: Uuid, tag_ids: &[Uuid]) -> Result<()> {
        tagging::set_list_tags(&self.repo, list_id, tag_ids, self.now())
    }

    pub fn tags_for_list(&self, list_id: Uuid) -> Result<Vec<Tag>> {
        tagging::tags_for_list(&self.repo, list_id)
    }

    pub fn lists_for_tag(&self, tag_id: Uuid) -> Result<Vec<List>> {
        tagging::lists_for_tag(&self.repo, tag_id)
    }

    // --- Preferences ---

    pub fn preferences(&self) -> Result<Preferences> {
        preferences::load(&self.repo, self.default_preferences())
    }

    pub fn update_preferences(&self, patch: PreferencesPatch) -> Result<Preferences> {
        preferences::update(&self.repo, patch, self.default_preferences())
    }

    fn default_preferences(&self) -> Preferences {
        Preferences::with_sort(self.config.default_sort)
    }
}
