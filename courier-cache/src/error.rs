//! Error type for cache backends.

use thiserror::Error;

/// Errors reported by a [`CacheBackend`](crate::CacheBackend).
///
/// [`PathCache`](crate::PathCache) logs these and carries on; they never fail
/// a path computation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CacheError {
    /// The backend could not complete the operation.
    #[error("cache backend failed: {reason}")]
    Backend {
        /// Description of the failure.
        reason: String,
    },
}

impl CacheError {
    /// Build a backend failure from any displayable reason.
    pub fn backend(reason: impl Into<String>) -> Self {
        Self::Backend {
            reason: reason.into(),
        }
    }
}
