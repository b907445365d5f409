//! Common test utilities for integration tests
//!
//! Shared fixtures for building volumes and caches.

use volcache::adapters::cache::admission::label_equals;
use volcache::{PersistentVolume, VolumeCache};

/// Label the scenario predicates select on.
pub const OWNER_LABEL: &str = "provisioner";

/// Value of [`OWNER_LABEL`] marking a volume as ours.
pub const OWNER_VALUE: &str = "mine";

/// A volume carrying the owner label.
pub fn owned_pv(name: &str) -> PersistentVolume {
    PersistentVolume::new(name).with_label(OWNER_LABEL, OWNER_VALUE)
}

/// A volume without the owner label.
pub fn foreign_pv(name: &str) -> PersistentVolume {
    PersistentVolume::new(name)
}

/// Cache admitting only volumes labelled `provisioner=mine`.
pub fn owner_cache() -> VolumeCache {
    VolumeCache::new(label_equals(OWNER_LABEL, OWNER_VALUE))
}

/// Sorted keys currently in the cache.
#[allow(dead_code)]
pub fn sorted_keys(cache: &VolumeCache) -> Vec<String> {
    use volcache::Store;

    let mut keys = cache.list_keys();
    keys.sort();
    keys
}

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
#[allow(dead_code)]
pub fn setup_test_logging() {
    use tracing_subscriber::fmt;

    let _ = fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}
