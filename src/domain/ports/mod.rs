//! Port trait definitions (Hexagonal Architecture)
//!
//! - Store: the keyed collection contract shared by the raw store and the
//!   admission-filtered cache, driven by an external populator
//! - Key derivation: how objects map to their string identity
//!
//! Adapters in `crate::adapters` implement these contracts.

pub mod key;
pub mod store;

pub use key::{meta_namespace_key, name_key, split_meta_namespace_key, KeyFunc, Tombstone};
pub use store::Store;
