//! Volcache - admission-filtered mirror of persistent volumes
//!
//! Volcache keeps a local, in-memory copy of the persistent volumes a
//! provisioner is responsible for, so that deciding whether a volume is
//! already known, or listing everything owned, never needs a round trip to
//! the API server.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): resource model, key derivation, the `Store` port
//! - **Adapter Layer** (`adapters`): the thread-safe store and the filtered cache
//! - **Infrastructure Layer** (`infrastructure`): configuration and logging
//!
//! # Example
//!
//! ```
//! use volcache::adapters::cache::admission::provisioned_by;
//! use volcache::{PersistentVolume, Store, VolumeCache};
//!
//! let cache = VolumeCache::new(provisioned_by("local-volume-provisioner"));
//!
//! // A populator pushes what it listed from the API server...
//! cache
//!     .replace(
//!         vec![
//!             PersistentVolume::new("local-pv-1").provisioned_by("local-volume-provisioner"),
//!             PersistentVolume::new("someone-elses"),
//!         ],
//!         "1042",
//!     )
//!     .unwrap();
//!
//! // ...and only owned volumes are kept.
//! assert!(cache.get_pv("local-pv-1").is_some());
//! assert!(cache.get_pv("someone-elses").is_none());
//! ```

pub mod adapters;
pub mod domain;
pub mod infrastructure;

// Re-export commonly used types for convenience
pub use adapters::cache::{AdmissionPredicate, FilteredKeyedCache, VolumeCache};
pub use adapters::store::ThreadSafeStore;
pub use domain::errors::{CacheError, CacheResult};
pub use domain::models::{
    AdmissionConfig, CacheConfig, Config, KeyStrategy, LoggingConfig, Metadata, ObjectMeta,
    PersistentVolume,
};
pub use domain::ports::{KeyFunc, Store, Tombstone};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use infrastructure::logging::LoggerImpl;
