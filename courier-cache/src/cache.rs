//! The path cache and its key index.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use log::{debug, warn};

use crate::{CacheBackend, CacheConfig, CacheKey, KeyPrefix, MokaBackend};

/// Keys currently stored plus the invalidation counter.
#[derive(Debug, Default)]
struct KeyIndex {
    keys: BTreeSet<CacheKey>,
    generation: u64,
}

/// Cache of path results with prefix invalidation.
///
/// Every operation runs under one lock covering the backend call and the key
/// index, so the index never disagrees with what a concurrent caller just
/// stored or removed. A disabled cache stores nothing and always misses.
///
/// # Examples
///
/// ```
/// use courier_cache::{CacheConfig, CacheKey, KeyPrefix, PathCache};
/// use courier_core::PointId;
///
/// let cache: PathCache<u32> = PathCache::new(&CacheConfig::default());
/// let key = CacheKey::all_paths(PointId(1), PointId(2));
/// cache.set(key, 7);
/// assert_eq!(cache.try_get(&key), Some(7));
///
/// cache.remove_by_prefix(&KeyPrefix::all());
/// assert_eq!(cache.try_get(&key), None);
/// ```
pub struct PathCache<V> {
    backend: Option<Box<dyn CacheBackend<V>>>,
    index: Mutex<KeyIndex>,
}

impl<V> fmt::Debug for PathCache<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathCache")
            .field("enabled", &self.backend.is_some())
            .field("index", &self.index)
            .finish()
    }
}

impl<V> PathCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    /// Build a cache from `config`, backed by [`MokaBackend`] when enabled.
    #[must_use]
    pub fn new(config: &CacheConfig) -> Self {
        if config.enabled {
            Self::with_backend(MokaBackend::new(config))
        } else {
            Self::disabled()
        }
    }

    /// Build a cache over a custom backend.
    #[must_use]
    pub fn with_backend<B>(backend: B) -> Self
    where
        B: CacheBackend<V> + 'static,
    {
        Self {
            backend: Some(Box::new(backend)),
            index: Mutex::new(KeyIndex::default()),
        }
    }

    /// Build a cache that never stores anything.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            backend: None,
            index: Mutex::new(KeyIndex::default()),
        }
    }

    /// Whether values are stored at all.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.backend.is_some()
    }

    fn index(&self) -> MutexGuard<'_, KeyIndex> {
        self.index.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Look up `key`.
    ///
    /// A key whose value has expired is dropped from the index. Backend
    /// failures count as a miss.
    pub fn try_get(&self, key: &CacheKey) -> Option<V> {
        let backend = self.backend.as_deref()?;
        let mut index = self.index();
        match backend.get(key) {
            Ok(Some(value)) => {
                debug!("cache hit for {key}");
                Some(value)
            }
            Ok(None) => {
                index.keys.remove(key);
                debug!("cache miss for {key}");
                None
            }
            Err(err) => {
                warn!("cache lookup for {key} failed, treating as a miss: {err}");
                None
            }
        }
    }

    /// Store `value` under `key`.
    pub fn set(&self, key: CacheKey, value: V) {
        let Some(backend) = self.backend.as_deref() else {
            return;
        };
        let mut index = self.index();
        Self::store(backend, &mut index, key, value);
    }

    /// Store `value` under `key` only if nothing was removed since
    /// [`generation`](Self::generation) returned `generation`.
    ///
    /// Returns whether the value was stored. Callers capture the generation
    /// before reading the graph so a result computed from data that was
    /// invalidated mid-flight is discarded.
    pub fn set_if_current(&self, key: CacheKey, value: V, generation: u64) -> bool {
        let Some(backend) = self.backend.as_deref() else {
            return false;
        };
        let mut index = self.index();
        if index.generation != generation {
            debug!(
                "discarding stale result for {key}: generation {generation} is now {}",
                index.generation
            );
            return false;
        }
        Self::store(backend, &mut index, key, value)
    }

    fn store(backend: &dyn CacheBackend<V>, index: &mut KeyIndex, key: CacheKey, value: V) -> bool {
        match backend.insert(key, value) {
            Ok(()) => {
                index.keys.insert(key);
                debug!("cached {key}");
                true
            }
            Err(err) => {
                warn!("caching {key} failed, skipping: {err}");
                false
            }
        }
    }

    /// Current invalidation counter. Every removal increments it.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.index().generation
    }

    /// Remove `key`.
    pub fn remove(&self, key: &CacheKey) {
        self.remove_by_prefix(&KeyPrefix::Key(*key));
    }

    /// Remove every key matching `prefix` and return how many were tracked.
    ///
    /// A key whose backend removal fails stays in the index so a later
    /// invalidation retries it.
    pub fn remove_by_prefix(&self, prefix: &KeyPrefix) -> usize {
        let Some(backend) = self.backend.as_deref() else {
            return 0;
        };
        let mut index = self.index();
        index.generation = index.generation.wrapping_add(1);
        let matching: Vec<CacheKey> = match prefix {
            KeyPrefix::Key(key) => vec![*key],
            _ => index
                .keys
                .iter()
                .filter(|key| prefix.matches(key))
                .copied()
                .collect(),
        };
        let mut removed = 0_usize;
        for key in matching {
            match backend.invalidate(&key) {
                Ok(()) => {
                    if index.keys.remove(&key) {
                        removed = removed.saturating_add(1);
                    }
                }
                Err(err) => warn!("invalidating {key} failed: {err}"),
            }
        }
        debug!("invalidated {removed} cache entries matching {prefix}");
        removed
    }

    /// Remove every entry.
    pub fn clear(&self) {
        self.remove_by_prefix(&KeyPrefix::all());
    }

    /// Number of keys whose values are still stored.
    ///
    /// Keys the backend has expired or evicted are dropped from the index
    /// first. A key whose check fails is still counted.
    #[must_use]
    pub fn len(&self) -> usize {
        let Some(backend) = self.backend.as_deref() else {
            return 0;
        };
        let mut index = self.index();
        Self::prune(backend, &mut index);
        index.keys.len()
    }

    /// Whether no values are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn prune(backend: &dyn CacheBackend<V>, index: &mut KeyIndex) {
        let before = index.keys.len();
        index.keys.retain(|key| {
            backend.contains(key).unwrap_or_else(|err| {
                warn!("checking {key} failed, keeping it: {err}");
                true
            })
        });
        let pruned = before.saturating_sub(index.keys.len());
        if pruned > 0 {
            debug!("dropped {pruned} expired keys from the index");
        }
    }
}
