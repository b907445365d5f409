//! `RwLock`-guarded hash map keyed by an injected key function.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::errors::CacheResult;
use crate::domain::models::Metadata;
use crate::domain::ports::{meta_namespace_key, KeyFunc, Store};

/// Map contents and the token of the last replace, guarded together so a
/// replace is observed all at once or not at all.
struct Inner<T> {
    items: HashMap<String, T>,
    resource_version: Option<String>,
}

/// Internally synchronized keyed store.
///
/// Reads clone values out under a shared lock; writes hold the exclusive
/// lock for a single map operation. Lock poisoning is ignored since no
/// write leaves the map in an intermediate state.
pub struct ThreadSafeStore<T> {
    inner: RwLock<Inner<T>>,
    key_func: KeyFunc<T>,
}

impl<T> ThreadSafeStore<T>
where
    T: Clone + Send + Sync,
{
    /// Create an empty store that keys objects with `key_func`.
    pub fn new(key_func: KeyFunc<T>) -> Self {
        Self {
            inner: RwLock::new(Inner {
                items: HashMap::new(),
                resource_version: None,
            }),
            key_func,
        }
    }

    /// Derive the key `obj` would be stored under.
    pub fn key_of(&self, obj: &T) -> CacheResult<String> {
        (self.key_func)(obj)
    }

    fn read(&self) -> RwLockReadGuard<'_, Inner<T>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner<T>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Remove the entry stored under `key`, returning whether one existed.
    pub fn delete_by_key(&self, key: &str) -> bool {
        self.write().items.remove(key).is_some()
    }

    /// Clone of the entry stored under `key`.
    pub fn lookup(&self, key: &str) -> Option<T> {
        self.read().items.get(key).cloned()
    }

    /// Whether an entry is stored under `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.read().items.contains_key(key)
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.read().items.len()
    }

    /// Whether the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.read().items.is_empty()
    }

    /// Token passed to the most recent [`Store::replace`], if any.
    pub fn last_sync_resource_version(&self) -> Option<String> {
        self.read().resource_version.clone()
    }

    fn upsert(&self, obj: T) -> CacheResult<()> {
        let key = self.key_of(&obj)?;
        self.write().items.insert(key, obj);
        Ok(())
    }
}

impl<T> ThreadSafeStore<T>
where
    T: Metadata + Clone + Send + Sync + 'static,
{
    /// Store keyed by `namespace/name`.
    pub fn with_namespace_keys() -> Self {
        Self::new(Arc::new(meta_namespace_key::<T>))
    }
}

impl<T> Store<T> for ThreadSafeStore<T>
where
    T: Clone + Send + Sync,
{
    fn add(&self, obj: T) -> CacheResult<()> {
        self.upsert(obj)
    }

    fn update(&self, obj: T) -> CacheResult<()> {
        self.upsert(obj)
    }

    fn delete(&self, obj: &T) -> CacheResult<()> {
        let key = self.key_of(obj)?;
        self.delete_by_key(&key);
        Ok(())
    }

    fn get(&self, obj: &T) -> CacheResult<Option<T>> {
        let key = self.key_of(obj)?;
        self.get_by_key(&key)
    }

    fn get_by_key(&self, key: &str) -> CacheResult<Option<T>> {
        Ok(self.lookup(key))
    }

    fn list(&self) -> Vec<T> {
        self.read().items.values().cloned().collect()
    }

    fn list_keys(&self) -> Vec<String> {
        self.read().items.keys().cloned().collect()
    }

    fn replace(&self, objs: Vec<T>, resource_version: &str) -> CacheResult<()> {
        // Key everything before taking the lock so a bad object leaves the
        // current contents untouched.
        let items = objs
            .into_iter()
            .map(|obj| -> CacheResult<(String, T)> { Ok((self.key_of(&obj)?, obj)) })
            .collect::<CacheResult<HashMap<_, _>>>()?;
        let count = items.len();

        {
            let mut inner = self.write();
            inner.items = items;
            inner.resource_version = Some(resource_version.to_string());
        }

        tracing::debug!(count, resource_version, "store contents replaced");
        Ok(())
    }

    fn resync(&self) -> CacheResult<()> {
        // Re-key a snapshot outside the lock; the map itself is never written,
        // so writes racing with a resync are never reverted.
        for obj in self.list() {
            self.key_of(&obj)?;
        }
        Ok(())
    }
}
