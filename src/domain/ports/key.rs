//! Key derivation for tracked objects.
//!
//! A key is the string identity of an object within a store: `namespace/name`
//! for namespaced objects and bare `name` for cluster-scoped ones.

use std::sync::Arc;

use crate::domain::errors::{CacheError, CacheResult};
use crate::domain::models::Metadata;

/// Strategy that maps an object to its store key.
pub type KeyFunc<T> = Arc<dyn Fn(&T) -> CacheResult<String> + Send + Sync>;

/// Derive `namespace/name`, or `name` when the object has no namespace.
pub fn meta_namespace_key<T: Metadata>(obj: &T) -> CacheResult<String> {
    let meta = obj.metadata();
    if meta.name.is_empty() {
        return Err(CacheError::key_derivation("object has no name"));
    }
    match meta.namespace.as_deref() {
        Some(namespace) if !namespace.is_empty() => Ok(format!("{namespace}/{}", meta.name)),
        _ => Ok(meta.name.clone()),
    }
}

/// Derive the bare object name, ignoring any namespace.
pub fn name_key<T: Metadata>(obj: &T) -> CacheResult<String> {
    let meta = obj.metadata();
    if meta.name.is_empty() {
        return Err(CacheError::key_derivation("object has no name"));
    }
    Ok(meta.name.clone())
}

/// Split a key produced by [`meta_namespace_key`] into namespace and name.
pub fn split_meta_namespace_key(key: &str) -> CacheResult<(Option<String>, String)> {
    let mut parts = key.split('/');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(name), None, None) if !name.is_empty() => Ok((None, name.to_string())),
        (Some(namespace), Some(name), None) if !name.is_empty() => {
            let namespace = (!namespace.is_empty()).then(|| namespace.to_string());
            Ok((namespace, name.to_string()))
        }
        _ => Err(CacheError::key_derivation(format!(
            "unexpected key format: {key:?}"
        ))),
    }
}

/// An object whose deletion was observed without its final state.
///
/// The watcher that produced it only knew the key the object was stored
/// under, so deletes go by that recorded key rather than a freshly derived one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tombstone<T> {
    /// Key the object was stored under
    pub key: String,
    /// Last known state, possibly stale
    pub obj: T,
}

impl<T> Tombstone<T> {
    /// Tombstone for the entry stored under `key`.
    pub fn new(key: impl Into<String>, obj: T) -> Self {
        Self {
            key: key.into(),
            obj,
        }
    }

    /// Build a tombstone keyed the way `key_func` would key the live object.
    pub fn for_object(obj: T, key_func: &KeyFunc<T>) -> CacheResult<Self> {
        let key = key_func(&obj)?;
        Ok(Self { key, obj })
    }
}
