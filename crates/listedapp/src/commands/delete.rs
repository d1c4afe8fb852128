//! Move a list to the trash.

use chrono::{DateTime, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use super::position_of;
use crate::error::{EntityKind, Result};
use crate::model::List;
use crate::store::repository::{Change, Repository};
use crate::store::EntityStore;

/// Soft-delete a list by stamping `deleted_at`.
///
/// Trashing an already trashed list is a no-op: its original deletion time
/// is kept, so repeated calls never extend the retention window.
pub fn run<S: EntityStore>(repo: &Repository<S>, id: Uuid, now: DateTime<Utc>) -> Result<List> {
    repo.mutate(|lists: &mut Vec<List>| {
        let idx = position_of(lists, EntityKind::List, id, |l| l.id)?;
        let list = &mut lists[idx];
        if list.is_trashed() {
            debug!(list_id = %id, "list already in trash");
            return Ok(Change::Unchanged(list.clone()));
        }
        list.deleted_at = Some(now);
        list.updated_at = now;
        info!(list_id = %id, "list moved to trash");
        Ok(Change::Changed(list.clone()))
    })
}
