//! Admission-filtered caching of mirrored objects.
//!
//! `FilteredKeyedCache` layers an admission predicate over a
//! [`ThreadSafeStore`](crate::adapters::store::ThreadSafeStore);
//! `VolumeCache` adds persistent-volume accessors on top.

pub mod admission;
pub mod filtered_cache;
pub mod volume_cache;

pub use admission::AdmissionPredicate;
pub use filtered_cache::FilteredKeyedCache;
pub use volume_cache::VolumeCache;
