//! Concurrency tests for the volume cache
//!
//! Populator and consumer threads hammer one shared cache; readers must only
//! ever see whole snapshots.

#[path = "../common/mod.rs"]
mod common;

use common::{owned_pv, owner_cache};
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock, Weak};
use std::thread;
use volcache::adapters::cache::admission::admit_all;
use volcache::domain::ports::meta_namespace_key;
use volcache::{CacheResult, KeyFunc, PersistentVolume, Store, Tombstone, VolumeCache};

const GENERATIONS: usize = 200;
const SNAPSHOT_SIZE: usize = 8;

fn generation(n: usize) -> Vec<PersistentVolume> {
    (0..SNAPSHOT_SIZE)
        .map(|i| owned_pv(&format!("gen{n}-pv{i}")))
        .collect()
}

fn generation_of(key: &str) -> &str {
    key.split('-').next().unwrap_or_default()
}

#[test]
fn test_replace_is_never_observed_half_applied() {
    let cache = Arc::new(owner_cache());
    cache.replace(generation(0), "0").expect("seed");
    let done = Arc::new(AtomicBool::new(false));

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let cache = Arc::clone(&cache);
            let done = Arc::clone(&done);
            thread::spawn(move || {
                let mut observed = 0usize;
                while !done.load(Ordering::SeqCst) {
                    let keys = cache.list_keys();
                    assert_eq!(keys.len(), SNAPSHOT_SIZE, "partial snapshot: {keys:?}");
                    let generations: BTreeSet<&str> =
                        keys.iter().map(String::as_str).map(generation_of).collect();
                    assert_eq!(generations.len(), 1, "mixed snapshot: {keys:?}");
                    observed += 1;
                }
                observed
            })
        })
        .collect();

    for n in 1..=GENERATIONS {
        cache
            .replace(generation(n), &n.to_string())
            .expect("replace");
    }
    done.store(true, Ordering::SeqCst);

    for reader in readers {
        reader.join().expect("reader thread panicked");
    }
    assert_eq!(
        cache.last_sync_resource_version(),
        Some(GENERATIONS.to_string())
    );
}

#[test]
fn test_concurrent_writers_and_readers() {
    let cache = Arc::new(owner_cache());

    let writers: Vec<_> = (0..4)
        .map(|w| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                for i in 0..100 {
                    let pv = owned_pv(&format!("w{w}-pv{i}"));
                    cache.add(pv.clone()).expect("add");
                    cache.update(pv.clone()).expect("update");
                    if i % 2 == 0 {
                        cache.delete(&pv).expect("delete");
                    }
                }
            })
        })
        .collect();

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                for _ in 0..200 {
                    for pv in cache.list_pvs() {
                        // Entries are never observed half written.
                        assert_eq!(pv.metadata.label("provisioner"), Some("mine"));
                    }
                    let _ = cache.get_pv("w0-pv1");
                }
            })
        })
        .collect();

    for handle in writers.into_iter().chain(readers) {
        handle.join().expect("thread panicked");
    }

    // Odd-numbered volumes survive from each writer.
    assert_eq!(cache.len(), 4 * 50);
    cache.resync().expect("resync");
    assert_eq!(cache.len(), 4 * 50);
}

#[test]
fn test_resync_never_resurrects_entry_deleted_mid_resync() {
    // Admit everything so a re-write of a deleted volume would get back in.
    let slot: Arc<OnceLock<Weak<VolumeCache>>> = Arc::new(OnceLock::new());
    let hook = Arc::clone(&slot);
    let key_func: KeyFunc<PersistentVolume> =
        Arc::new(move |pv: &PersistentVolume| -> CacheResult<String> {
            if pv.name() == "a" {
                if let Some(cache) = hook.get().and_then(Weak::upgrade) {
                    cache
                        .delete_tombstone(&Tombstone::new("b", pv.clone()))
                        .expect("delete");
                }
            }
            meta_namespace_key(pv)
        });
    let cache = Arc::new(VolumeCache::with_key_func(admit_all(), key_func));
    cache.add(owned_pv("a")).expect("add a");
    cache.add(owned_pv("b")).expect("add b");
    slot.set(Arc::downgrade(&cache)).expect("set once");

    cache.resync().expect("resync");

    assert!(cache.get_pv("b").is_none(), "deleted entry came back");
    assert!(cache.get_pv("a").is_some());
}

#[test]
fn test_resync_alongside_deletes_and_updates() {
    const VOLUMES: usize = 200;

    let cache = Arc::new(VolumeCache::new(admit_all()));
    for i in 0..VOLUMES {
        cache.add(owned_pv(&format!("pv{i}"))).expect("add");
    }
    let done = Arc::new(AtomicBool::new(false));

    let resyncer = {
        let cache = Arc::clone(&cache);
        let done = Arc::clone(&done);
        thread::spawn(move || {
            while !done.load(Ordering::SeqCst) {
                cache.resync().expect("resync");
            }
        })
    };

    for i in 0..VOLUMES {
        let name = format!("pv{i}");
        if i % 2 == 0 {
            cache.delete(&owned_pv(&name)).expect("delete");
        } else {
            cache
                .update(owned_pv(&name).with_label("tier", "fast"))
                .expect("update");
        }
    }
    done.store(true, Ordering::SeqCst);
    resyncer.join().expect("resync thread panicked");

    assert_eq!(cache.len(), VOLUMES / 2);
    for i in 0..VOLUMES {
        let stored = cache.get_pv(&format!("pv{i}"));
        if i % 2 == 0 {
            assert!(stored.is_none(), "pv{i} was deleted but came back");
        } else {
            let tier = stored.as_ref().and_then(|pv| pv.metadata.label("tier"));
            assert_eq!(tier, Some("fast"), "pv{i} update was reverted");
        }
    }
}
