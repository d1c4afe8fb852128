//! Whole-collection read-modify-write cycles must not lose updates when
//! several threads mutate the same collection.

use chrono::{Duration, TimeZone, Utc};
use listedapp::clock::FixedClock;
use listedapp::config::ListedConfig;
use listedapp::commands::purge;
use listedapp::model::{List, NewItem, NewList, NewTag};
use listedapp::store::fs_backend::FsBackend;
use listedapp::store::mem_backend::MemBackend;
use listedapp::store::EntityStore;
use listedapp::ListedApi;
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

const THREADS: usize = 8;
const PER_THREAD: usize = 25;

fn shared_api<S: EntityStore>(store: S) -> Arc<ListedApi<S, FixedClock>> {
    let start = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
    Arc::new(ListedApi::new(
        store,
        FixedClock::new(start),
        ListedConfig::default(),
    ))
}

fn create_lists_concurrently<S: EntityStore + 'static>(api: Arc<ListedApi<S, FixedClock>>) {
    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let api = Arc::clone(&api);
            thread::spawn(move || {
                for i in 0..PER_THREAD {
                    api.create_list(NewList::named(format!("list-{}-{}", t, i)))
                        .unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn concurrent_creates_lose_nothing_in_memory() {
    let api = shared_api(MemBackend::new());
    create_lists_concurrently(Arc::clone(&api));
    assert_eq!(api.lists().unwrap().len(), THREADS * PER_THREAD);
}

#[test]
fn concurrent_creates_lose_nothing_on_disk() {
    let dir = TempDir::new().unwrap();
    let api = shared_api(FsBackend::new(dir.path()));
    create_lists_concurrently(Arc::clone(&api));
    assert_eq!(api.lists().unwrap().len(), THREADS * PER_THREAD);
}

#[test]
fn concurrent_item_toggles_on_different_items() {
    let api = shared_api(MemBackend::new());
    let list = api.create_list(NewList::named("L")).unwrap();
    let ids: Vec<_> = (0..THREADS * 4)
        .map(|i| api.create_item(NewItem::new(list.id, format!("item {}", i))).unwrap().id)
        .collect();

    let handles: Vec<_> = ids
        .chunks(4)
        .map(|chunk| {
            let api = Arc::clone(&api);
            let chunk = chunk.to_vec();
            thread::spawn(move || {
                for id in chunk {
                    api.toggle_item(id).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let stats = api.list_stats(list.id).unwrap();
    assert_eq!(stats.total, ids.len());
    assert_eq!(stats.completed, ids.len());
}

#[test]
fn concurrent_attach_of_same_pair_yields_one_link() {
    let api = shared_api(MemBackend::new());
    let list = api.create_list(NewList::named("L")).unwrap();
    let tag = api.create_tag(NewTag::new("Urgent", "#FF6B6B")).unwrap();

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let api = Arc::clone(&api);
            thread::spawn(move || api.attach_tag(list.id, tag.id).unwrap())
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(api.list_with_tags(list.id).unwrap().tags, vec![tag.id]);
}

#[test]
fn concurrent_purges_remove_each_list_once() {
    let api = shared_api(MemBackend::new());
    let mut trashed = Vec::new();
    for i in 0..10 {
        let list = api.create_list(NewList::named(format!("l{}", i))).unwrap();
        api.soft_delete_list(list.id).unwrap();
        trashed.push(list.id);
    }
    let survivor = api.create_list(NewList::named("keep")).unwrap();

    let expired_at = api.now() + Duration::days(15);
    let snapshot: Vec<List> = api.repository().load().unwrap();
    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let api = Arc::clone(&api);
            let snapshot = snapshot.clone();
            thread::spawn(move || purge::run(api.repository(), &snapshot, expired_at).unwrap())
        })
        .collect();

    let mut purged: Vec<_> = handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();
    purged.sort();
    trashed.sort();
    assert_eq!(purged, trashed);

    let remaining: Vec<List> = api.repository().load().unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, survivor.id);
}
