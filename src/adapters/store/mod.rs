//! General-purpose keyed storage.
//!
//! `ThreadSafeStore` is the container every cache in this crate is layered
//! over. It knows nothing about admission; it only keys, stores and swaps.

pub mod thread_safe_store;

pub use thread_safe_store::ThreadSafeStore;
