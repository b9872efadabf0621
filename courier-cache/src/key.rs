//! Structured cache keys and invalidation prefixes.

use std::fmt;

use courier_core::{Metric, PointId};

/// Family of cached results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Namespace {
    /// Every simple path between two points.
    AllPaths,
    /// The cheapest path between two points.
    BestCost,
    /// The fastest path between two points.
    BestTime,
}

impl Namespace {
    /// Every namespace, in display order.
    pub const ALL: [Self; 3] = [Self::AllPaths, Self::BestCost, Self::BestTime];

    /// Namespace holding best paths under `metric`.
    #[must_use]
    pub const fn best(metric: Metric) -> Self {
        match metric {
            Metric::Cost => Self::BestCost,
            Metric::Time => Self::BestTime,
        }
    }

    /// Name used in the key's display form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AllPaths => "all-paths",
            Self::BestCost => "best-cost",
            Self::BestTime => "best-time",
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifies one cached result.
///
/// Keys compare by component, so `(all-paths, 5, 1)` and `(all-paths, 50, 1)`
/// are unrelated even though one display form starts with the other.
///
/// # Examples
///
/// ```
/// use courier_cache::CacheKey;
/// use courier_core::{Metric, PointId};
///
/// let key = CacheKey::best_path(PointId(1), PointId(2), Metric::Time);
/// assert_eq!(key.to_string(), "best-time:1:2");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CacheKey {
    /// Result family.
    pub namespace: Namespace,
    /// Origin point of the query.
    pub origin: PointId,
    /// Destination point of the query.
    pub destination: PointId,
}

impl CacheKey {
    /// Build a key from its components.
    #[must_use]
    pub const fn new(namespace: Namespace, origin: PointId, destination: PointId) -> Self {
        Self {
            namespace,
            origin,
            destination,
        }
    }

    /// Key of the all-paths result for a pair.
    #[must_use]
    pub const fn all_paths(origin: PointId, destination: PointId) -> Self {
        Self::new(Namespace::AllPaths, origin, destination)
    }

    /// Key of the best-path result for a pair under `metric`.
    #[must_use]
    pub const fn best_path(origin: PointId, destination: PointId, metric: Metric) -> Self {
        Self::new(Namespace::best(metric), origin, destination)
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.namespace, self.origin, self.destination)
    }
}

/// Selects the keys removed by [`PathCache::remove_by_prefix`].
///
/// [`PathCache::remove_by_prefix`]: crate::PathCache::remove_by_prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPrefix {
    /// Every key.
    All,
    /// Every key in one namespace.
    Namespace(Namespace),
    /// Exactly one key.
    Key(CacheKey),
}

impl KeyPrefix {
    /// Prefix matching every key.
    #[must_use]
    pub const fn all() -> Self {
        Self::All
    }

    /// Whether `key` falls under this prefix.
    #[must_use]
    pub fn matches(&self, key: &CacheKey) -> bool {
        match self {
            Self::All => true,
            Self::Namespace(namespace) => key.namespace == *namespace,
            Self::Key(exact) => key == exact,
        }
    }
}

impl fmt::Display for KeyPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("*"),
            Self::Namespace(namespace) => write!(f, "{namespace}:*"),
            Self::Key(key) => key.fmt(f),
        }
    }
}
