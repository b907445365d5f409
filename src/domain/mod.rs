//! Domain layer for volcache
//!
//! This module contains the resource model, the store contract and the
//! error type shared by every adapter.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{CacheError, CacheResult};
