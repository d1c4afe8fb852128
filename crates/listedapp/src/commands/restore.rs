//! Bring a list back from the trash.

use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use super::position_of;
use crate::error::{EntityKind, Result};
use crate::model::List;
use crate::store::repository::{Change, Repository};
use crate::store::EntityStore;

/// Clear `deleted_at` on a trashed list.
///
/// Restoring an active list is a no-op. A list that no longer exists
/// (never created, or already purged) is `NotFound`.
pub fn run<S: EntityStore>(repo: &Repository<S>, id: Uuid, now: DateTime<Utc>) -> Result<List> {
    repo.mutate(|lists: &mut Vec<List>| {
        let idx = position_of(lists, EntityKind::List, id, |l| l.id)?;
        let list = &mut lists[idx];
        if list.is_active() {
            return Ok(Change::Unchanged(list.clone()));
        }
        // created_at is kept so the list returns to its original position
        list.deleted_at = None;
        list.updated_at = now;
        info!(list_id = %id, "list restored");
        Ok(Change::Changed(list.clone()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{delete, lists, purge};
    use crate::model::NewList;
    use crate::query;
    use crate::test_utils::{mem_repo, t0};
    use chrono::Duration;

    #[test]
    fn restores_deleted_list() {
        let repo = mem_repo();
        let list = lists::create(
            &repo,
            NewList::named("Groceries").with_description("weekly"),
            t0(),
        )
        .unwrap();
        delete::run(&repo, list.id, t0() + Duration::hours(1)).unwrap();

        let later = t0() + Duration::days(2);
        let restored = run(&repo, list.id, later).unwrap();

        assert_eq!(restored.deleted_at, None);
        assert_eq!(restored.updated_at, later);
        // Everything but deleted_at / updated_at is untouched.
        assert_eq!(restored.id, list.id);
        assert_eq!(restored.name, list.name);
        assert_eq!(restored.description, list.description);
        assert_eq!(restored.created_at, list.created_at);

        let all = lists::list_all(&repo).unwrap();
        assert_eq!(query::active_lists(&all).len(), 1);
    }

    #[test]
    fn restoring_active_list_is_noop() {
        let repo = mem_repo();
        let list = lists::create(&repo, NewList::named("L"), t0()).unwrap();
        let writes = repo.store().write_count();

        let same = run(&repo, list.id, t0() + Duration::days(1)).unwrap();
        assert_eq!(same, list);
        assert_eq!(repo.store().write_count(), writes);
    }

    #[test]
    fn restoring_unknown_list_is_not_found() {
        let repo = mem_repo();
        assert!(run(&repo, Uuid::new_v4(), t0()).unwrap_err().is_not_found());
    }

    #[test]
    fn restoring_purged_list_is_not_found() {
        let repo = mem_repo();
        let list = lists::create(&repo, NewList::named("L"), t0()).unwrap();
        delete::run(&repo, list.id, t0()).unwrap();
        let snapshot = lists::list_all(&repo).unwrap();
        purge::run(&repo, &snapshot, t0() + Duration::days(14)).unwrap();

        assert!(run(&repo, list.id, t0() + Duration::days(14))
            .unwrap_err()
            .is_not_found());
    }
}
