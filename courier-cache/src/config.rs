//! Cache configuration.

use std::time::Duration;

/// Settings for [`PathCache::new`](crate::PathCache::new).
///
/// Missing fields take their defaults when deserialized, so an empty table
/// enables caching with a five minute sliding expiration.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use courier_cache::CacheConfig;
///
/// let config = CacheConfig::default();
/// assert!(config.enabled);
/// assert_eq!(config.time_to_idle(), Duration::from_secs(300));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct CacheConfig {
    /// Whether results are cached at all.
    pub enabled: bool,
    /// Minutes an entry survives without being read.
    pub expire_minutes: u64,
    /// Upper bound on stored entries; unbounded when absent.
    pub max_entries: Option<u64>,
}

impl CacheConfig {
    /// Default sliding expiration, in minutes.
    pub const DEFAULT_EXPIRE_MINUTES: u64 = 5;

    /// A configuration that turns caching off.
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            enabled: false,
            expire_minutes: Self::DEFAULT_EXPIRE_MINUTES,
            max_entries: None,
        }
    }

    /// Idle period after which an entry expires.
    #[must_use]
    pub const fn time_to_idle(&self) -> Duration {
        Duration::from_secs(self.expire_minutes.saturating_mul(60))
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            expire_minutes: Self::DEFAULT_EXPIRE_MINUTES,
            max_entries: None,
        }
    }
}
