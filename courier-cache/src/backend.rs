//! Storage behind [`PathCache`](crate::PathCache).

use std::fmt;
use std::time::Duration;

use moka::sync::Cache;

use crate::{CacheConfig, CacheError, CacheKey};

/// A key-value store with expiry that holds cached path results.
///
/// Implementations report failures instead of panicking; the cache logs them
/// and degrades to recomputation.
pub trait CacheBackend<V>: Send + Sync {
    /// Fetch the value stored under `key`, if it has not expired.
    fn get(&self, key: &CacheKey) -> Result<Option<V>, CacheError>;

    /// Store `value` under `key`, replacing any previous value.
    fn insert(&self, key: CacheKey, value: V) -> Result<(), CacheError>;

    /// Drop the value stored under `key`.
    fn invalidate(&self, key: &CacheKey) -> Result<(), CacheError>;

    /// Whether a live value is stored under `key`.
    ///
    /// The default reads the value. Backends whose reads extend an entry's
    /// lifetime should override this with a check that does not.
    fn contains(&self, key: &CacheKey) -> Result<bool, CacheError> {
        Ok(self.get(key)?.is_some())
    }
}

/// In-process backend built on [`moka::sync::Cache`].
///
/// Entries expire after sitting unread for the configured idle period, and
/// each read restarts that period.
pub struct MokaBackend<V> {
    entries: Cache<CacheKey, V>,
}

impl<V> MokaBackend<V>
where
    V: Clone + Send + Sync + 'static,
{
    /// Build a backend from `config`, ignoring its `enabled` flag.
    #[must_use]
    pub fn new(config: &CacheConfig) -> Self {
        Self::with_time_to_idle(config.time_to_idle(), config.max_entries)
    }

    /// Build a backend with an explicit idle period and optional capacity.
    #[must_use]
    pub fn with_time_to_idle(idle: Duration, max_entries: Option<u64>) -> Self {
        let mut builder = Cache::builder().time_to_idle(idle);
        if let Some(capacity) = max_entries {
            builder = builder.max_capacity(capacity);
        }
        Self {
            entries: builder.build(),
        }
    }
}

impl<V> fmt::Debug for MokaBackend<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MokaBackend").finish_non_exhaustive()
    }
}

impl<V> CacheBackend<V> for MokaBackend<V>
where
    V: Clone + Send + Sync + 'static,
{
    fn get(&self, key: &CacheKey) -> Result<Option<V>, CacheError> {
        Ok(self.entries.get(key))
    }

    fn insert(&self, key: CacheKey, value: V) -> Result<(), CacheError> {
        self.entries.insert(key, value);
        Ok(())
    }

    fn invalidate(&self, key: &CacheKey) -> Result<(), CacheError> {
        self.entries.invalidate(key);
        Ok(())
    }

    // `contains_key` skips expired entries without restarting the idle timer.
    fn contains(&self, key: &CacheKey) -> Result<bool, CacheError> {
        Ok(self.entries.contains_key(key))
    }
}
