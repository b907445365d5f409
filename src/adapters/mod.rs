//! Adapters implementing the domain store contract.

pub mod cache;
pub mod store;
