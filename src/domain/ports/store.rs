use crate::domain::errors::CacheResult;

/// Keyed collection of objects mirrored from an authoritative source.
///
/// A populator drives the mutating half (`add`, `update`, `delete`,
/// `replace`, `resync`) while consumers read. Implementations must be
/// internally synchronized: every method takes `&self` and may be called
/// from any thread.
pub trait Store<T>: Send + Sync {
    /// Insert or overwrite the object under its derived key.
    fn add(&self, obj: T) -> CacheResult<()>;

    /// Same as [`Store::add`]; kept separate so callers can express intent.
    fn update(&self, obj: T) -> CacheResult<()>;

    /// Remove the object's entry. Removing an absent key is not an error.
    fn delete(&self, obj: &T) -> CacheResult<()>;

    /// Look up the stored object with the same key as `obj`.
    ///
    /// # Returns
    /// * `Ok(Some(obj))` if present
    /// * `Ok(None)` if absent
    /// * `Err(CacheError::KeyDerivation)` if `obj` cannot be keyed
    fn get(&self, obj: &T) -> CacheResult<Option<T>>;

    /// Look up the object stored under `key`. Never fails for a missing key.
    fn get_by_key(&self, key: &str) -> CacheResult<Option<T>>;

    /// Point-in-time snapshot of every stored object, in no particular order.
    fn list(&self) -> Vec<T>;

    /// Point-in-time snapshot of every stored key.
    fn list_keys(&self) -> Vec<String>;

    /// Atomically swap the whole contents for `objs`.
    ///
    /// `resource_version` is an opaque token recorded for bookkeeping; it is
    /// never interpreted.
    fn replace(&self, objs: Vec<T>, resource_version: &str) -> CacheResult<()>;

    /// Re-derive the key of every stored object. Never writes, so concurrent
    /// writes are never reverted.
    fn resync(&self) -> CacheResult<()>;
}
