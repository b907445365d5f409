//! Admission-gated keyed cache.
//!
//! Objects the cache has never seen must pass the admission predicate to get
//! in. Objects it already holds are refreshed unconditionally, so a predicate
//! that briefly stops matching cannot evict an entry the populator still
//! considers current.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};

use super::admission::{self, AdmissionPredicate};
use crate::adapters::store::ThreadSafeStore;
use crate::domain::errors::CacheResult;
use crate::domain::models::{CacheConfig, KeyStrategy, Metadata};
use crate::domain::ports::{meta_namespace_key, name_key, KeyFunc, Store, Tombstone};

/// Keyed mirror of the objects this process owns.
///
/// The populator drives it through [`Store`]; consumers read through the same
/// trait or the typed accessors on [`super::VolumeCache`]. Cheap to share
/// behind an `Arc`.
pub struct FilteredKeyedCache<T> {
    store: ThreadSafeStore<T>,
    predicate: AdmissionPredicate<T>,
}

impl<T> FilteredKeyedCache<T>
where
    T: Clone + Send + Sync,
{
    /// Create a cache with a custom key function.
    pub fn with_key_func(predicate: AdmissionPredicate<T>, key_func: KeyFunc<T>) -> Self {
        Self {
            store: ThreadSafeStore::new(key_func),
            predicate,
        }
    }

    /// Whether an entry exists under `obj`'s key. Unkeyable objects never exist.
    pub fn exists(&self, obj: &T) -> bool {
        self.store
            .key_of(obj)
            .is_ok_and(|key| self.store.contains_key(&key))
    }

    /// Known objects are always admitted; unknown ones only if the predicate
    /// accepts them.
    fn admits(&self, obj: &T) -> bool {
        if self.exists(obj) {
            return true;
        }
        (self.predicate)(obj)
    }

    fn admit(&self, obj: T) -> CacheResult<()> {
        if self.admits(&obj) {
            return self.store.add(obj);
        }
        trace!("object rejected by admission predicate");
        Ok(())
    }

    /// Remove the entry recorded by a tombstone, whatever its last known state.
    pub fn delete_tombstone(&self, tombstone: &Tombstone<T>) -> CacheResult<()> {
        self.store.delete_by_key(&tombstone.key);
        Ok(())
    }

    /// Number of admitted entries.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Whether nothing has been admitted yet.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Token passed to the most recent [`Store::replace`], if any.
    pub fn last_sync_resource_version(&self) -> Option<String> {
        self.store.last_sync_resource_version()
    }

    /// Backing store, bypassing admission.
    pub(crate) const fn store(&self) -> &ThreadSafeStore<T> {
        &self.store
    }
}

impl<T> FilteredKeyedCache<T>
where
    T: Metadata + Clone + Send + Sync + 'static,
{
    /// Create a cache keyed by `namespace/name`.
    pub fn new(predicate: AdmissionPredicate<T>) -> Self {
        Self::with_key_func(predicate, Arc::new(meta_namespace_key::<T>))
    }

    /// Create a cache whose keying and admission come from configuration.
    pub fn from_config(config: &CacheConfig) -> Self {
        let key_func: KeyFunc<T> = match config.key_strategy {
            KeyStrategy::Namespaced => Arc::new(meta_namespace_key::<T>),
            KeyStrategy::NameOnly => Arc::new(name_key::<T>),
        };
        Self::with_key_func(admission::from_config(&config.admission), key_func)
    }
}

impl<T> Store<T> for FilteredKeyedCache<T>
where
    T: Clone + Send + Sync,
{
    fn add(&self, obj: T) -> CacheResult<()> {
        self.admit(obj)
    }

    fn update(&self, obj: T) -> CacheResult<()> {
        self.admit(obj)
    }

    fn delete(&self, obj: &T) -> CacheResult<()> {
        self.store.delete(obj)
    }

    fn get(&self, obj: &T) -> CacheResult<Option<T>> {
        self.store.get(obj)
    }

    fn get_by_key(&self, key: &str) -> CacheResult<Option<T>> {
        self.store.get_by_key(key)
    }

    fn list(&self) -> Vec<T> {
        self.store.list()
    }

    fn list_keys(&self) -> Vec<String> {
        self.store.list_keys()
    }

    fn replace(&self, objs: Vec<T>, resource_version: &str) -> CacheResult<()> {
        let offered = objs.len();
        let admitted: Vec<T> = objs.into_iter().filter(|obj| self.admits(obj)).collect();
        debug!(
            offered,
            admitted = admitted.len(),
            resource_version,
            "replacing cache contents"
        );
        self.store.replace(admitted, resource_version)
    }

    fn resync(&self) -> CacheResult<()> {
        debug!(count = self.store.len(), "resyncing cache");
        self.store.resync()
    }
}

impl<T> fmt::Debug for FilteredKeyedCache<T>
where
    T: Clone + Send + Sync,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilteredKeyedCache")
            .field("len", &self.len())
            .field(
                "last_sync_resource_version",
                &self.last_sync_resource_version(),
            )
            .finish_non_exhaustive()
    }
}
