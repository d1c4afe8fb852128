//! Permanent removal of lists whose retention window has elapsed.
//!
//! There is no background timer. Hosts call [`run`] opportunistically, e.g.
//! every time lists are loaded; calling it repeatedly is cheap and harmless.
//!
//! Items and tag links of purged lists are left in place.

use chrono::{DateTime, Utc};
use std::collections::HashSet;
use tracing::info;
use uuid::Uuid;

use crate::error::Result;
use crate::model::List;
use crate::store::repository::{Change, Repository};
use crate::store::EntityStore;

/// Ids of the trashed lists in `lists` that are due for purging at `now`.
///
/// Pure: use it to preview what [`run`] would remove.
pub fn preview(lists: &[List], now: DateTime<Utc>) -> Vec<Uuid> {
    lists
        .iter()
        .filter(|l| l.is_expired(now))
        .map(|l| l.id)
        .collect()
}

/// Purge the expired lists found in the `lists` snapshot.
///
/// Candidates come from the snapshot, but each one is checked again against
/// the stored collection inside the write cycle: a list restored after the
/// snapshot was taken survives. Returns the ids actually removed.
pub fn run<S: EntityStore>(
    repo: &Repository<S>,
    lists: &[List],
    now: DateTime<Utc>,
) -> Result<Vec<Uuid>> {
    let candidates: HashSet<Uuid> = preview(lists, now).into_iter().collect();
    if candidates.is_empty() {
        return Ok(Vec::new());
    }

    repo.mutate(|stored: &mut Vec<List>| {
        let mut purged = Vec::new();
        stored.retain(|list| {
            let due = candidates.contains(&list.id) && list.is_expired(now);
            if due {
                purged.push(list.id);
            }
            !due
        });
        if purged.is_empty() {
            return Ok(Change::Unchanged(purged));
        }
        for id in &purged {
            info!(list_id = %id, "expired list purged");
        }
        Ok(Change::Changed(purged))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{delete, lists, restore};
    use crate::model::NewList;
    use crate::query;
    use crate::test_utils::{mem_repo, t0};
    use chrono::Duration;

    #[test]
    fn purges_list_after_retention() {
        let repo = mem_repo();
        let list = lists::create(&repo, NewList::named("L"), t0()).unwrap();
        delete::run(&repo, list.id, t0()).unwrap();

        let at_13 = t0() + Duration::days(13);
        let snapshot = lists::list_all(&repo).unwrap();
        assert!(run(&repo, &snapshot, at_13).unwrap().is_empty());
        let trash = query::trash_view(&snapshot, at_13);
        assert_eq!(trash.len(), 1);
        assert_eq!(trash[0].days_remaining, 1);

        let at_14 = t0() + Duration::days(14);
        let purged = run(&repo, &snapshot, at_14).unwrap();
        assert_eq!(purged, vec![list.id]);

        let after = lists::list_all(&repo).unwrap();
        assert!(after.is_empty());
        assert!(query::trash_view(&after, at_14).is_empty());
        assert!(query::active_lists(&after).is_empty());
    }

    #[test]
    fn never_purges_active_lists() {
        let repo = mem_repo();
        lists::create(&repo, NewList::named("Old"), t0()).unwrap();
        let snapshot = lists::list_all(&repo).unwrap();

        let purged = run(&repo, &snapshot, t0() + Duration::days(400)).unwrap();
        assert!(purged.is_empty());
        assert_eq!(lists::list_all(&repo).unwrap().len(), 1);
    }

    #[test]
    fn keeps_lists_with_days_remaining() {
        let repo = mem_repo();
        let fresh = lists::create(&repo, NewList::named("Fresh"), t0()).unwrap();
        let stale = lists::create(&repo, NewList::named("Stale"), t0()).unwrap();
        delete::run(&repo, stale.id, t0()).unwrap();
        delete::run(&repo, fresh.id, t0() + Duration::days(10)).unwrap();

        let snapshot = lists::list_all(&repo).unwrap();
        let purged = run(&repo, &snapshot, t0() + Duration::days(15)).unwrap();
        assert_eq!(purged, vec![stale.id]);
        assert_eq!(lists::get(&repo, fresh.id).unwrap().name, "Fresh");
    }

    #[test]
    fn restored_after_snapshot_survives() {
        let repo = mem_repo();
        let list = lists::create(&repo, NewList::named("L"), t0()).unwrap();
        delete::run(&repo, list.id, t0()).unwrap();
        let stale_snapshot = lists::list_all(&repo).unwrap();

        let now = t0() + Duration::days(20);
        restore::run(&repo, list.id, now).unwrap();

        let purged = run(&repo, &stale_snapshot, now).unwrap();
        assert!(purged.is_empty());
        assert!(lists::get(&repo, list.id).unwrap().is_active());
    }

    #[test]
    fn repeated_purge_is_harmless() {
        let repo = mem_repo();
        let list = lists::create(&repo, NewList::named("L"), t0()).unwrap();
        delete::run(&repo, list.id, t0()).unwrap();
        let snapshot = lists::list_all(&repo).unwrap();
        let now = t0() + Duration::days(30);

        assert_eq!(run(&repo, &snapshot, now).unwrap(), vec![list.id]);
        let writes = repo.store().write_count();
        assert!(run(&repo, &snapshot, now).unwrap().is_empty());
        assert_eq!(repo.store().write_count(), writes);
    }

    #[test]
    fn nothing_due_means_no_write() {
        let repo = mem_repo();
        lists::create(&repo, NewList::named("L"), t0()).unwrap();
        let writes = repo.store().write_count();
        let snapshot = lists::list_all(&repo).unwrap();
        run(&repo, &snapshot, t0()).unwrap();
        assert_eq!(repo.store().write_count(), writes);
    }

    #[test]
    fn preview_lists_expired_ids_only() {
        let repo = mem_repo();
        let a = lists::create(&repo, NewList::named("A"), t0()).unwrap();
        let b = lists::create(&repo, NewList::named("B"), t0()).unwrap();
        delete::run(&repo, a.id, t0()).unwrap();
        delete::run(&repo, b.id, t0() + Duration::days(5)).unwrap();

        let snapshot = lists::list_all(&repo).unwrap();
        assert_eq!(preview(&snapshot, t0() + Duration::days(14)), vec![a.id]);
        assert_eq!(
            preview(&snapshot, t0() + Duration::days(19)),
            vec![a.id, b.id]
        );
    }
}
