//! Domain errors for the volume cache.

use thiserror::Error;

/// Errors raised by cache and store operations.
///
/// Lookups signal absence with `Option::None` and admission rejection is a
/// silent no-op, so the only failure surface is an object that cannot be
/// keyed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CacheError {
    /// The key function could not produce a key for an object.
    #[error("Key derivation failed: {reason}")]
    KeyDerivation {
        /// Why the object could not be keyed
        reason: String,
    },
}

impl CacheError {
    /// Build a key derivation error from any displayable reason.
    pub fn key_derivation(reason: impl Into<String>) -> Self {
        Self::KeyDerivation {
            reason: reason.into(),
        }
    }
}

/// Result type for cache and store operations.
pub type CacheResult<T> = Result<T, CacheError>;
