//! Typed accessors for the persistent volume cache.
//!
//! These bypass admission: they are for volumes the provisioner created
//! itself and therefore already knows belong here.

use tracing::{info, warn};

use super::filtered_cache::FilteredKeyedCache;
use crate::domain::models::PersistentVolume;
use crate::domain::ports::Store;

/// Cache of the persistent volumes created by this provisioner.
///
/// Periodically refreshed by a populator; read by the deleter and
/// discoverer to check on volumes they manage.
pub type VolumeCache = FilteredKeyedCache<PersistentVolume>;

impl FilteredKeyedCache<PersistentVolume> {
    /// Look up a volume by name.
    pub fn get_pv(&self, name: &str) -> Option<PersistentVolume> {
        self.store().lookup(name)
    }

    /// Insert or overwrite a volume without consulting the admission predicate.
    pub fn add_pv(&self, pv: PersistentVolume) {
        let name = pv.name().to_string();
        match self.store().add(pv) {
            Ok(()) => info!(pv = %name, "added pv to cache"),
            Err(e) => warn!(pv = %name, error = %e, "failed to add pv to cache"),
        }
    }

    /// Same as [`Self::add_pv`].
    pub fn update_pv(&self, pv: PersistentVolume) {
        let name = pv.name().to_string();
        match self.store().update(pv) {
            Ok(()) => info!(pv = %name, "updated pv in cache"),
            Err(e) => warn!(pv = %name, error = %e, "failed to update pv in cache"),
        }
    }

    /// Remove a volume. Removing an unknown volume is not an error.
    pub fn delete_pv(&self, pv: &PersistentVolume) {
        match self.store().delete(pv) {
            Ok(()) => info!(pv = %pv.name(), "deleted pv from cache"),
            Err(e) => warn!(pv = %pv.name(), error = %e, "failed to delete pv from cache"),
        }
    }

    /// Snapshot of every cached volume, in no particular order.
    pub fn list_pvs(&self) -> Vec<PersistentVolume> {
        self.store().list()
    }
}
