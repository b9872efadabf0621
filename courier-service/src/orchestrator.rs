//! Cache-aware coordination of the path searches.

use std::sync::Arc;

use courier_cache::{CacheConfig, CacheKey, PathCache};
use courier_core::{GraphRepository, GraphSnapshot, Metric, PointId, Route, StepsCollection};
use log::debug;

use crate::OrchestratorError;
use crate::flight::FlightTable;

/// Values held by the orchestrator's cache.
///
/// Cached results are shared and never mutated; invalidation replaces them
/// wholesale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CachedPaths {
    /// Every path between a pair, stored under an all-paths key.
    AllPaths(Arc<Route>),
    /// The best path for one metric, or `None` when no path exists.
    BestPath(Option<Arc<StepsCollection>>),
}

/// Answers path queries from the cache, computing and storing results on a
/// miss.
///
/// Each computation loads a fresh [`GraphSnapshot`]. Concurrent misses for the
/// same key are serialized so only the first caller computes. Results are
/// stored only if no invalidation happened while they were computed.
///
/// # Examples
///
/// ```
/// use courier_cache::CacheConfig;
/// use courier_core::test_support::MemoryGraph;
/// use courier_core::{Metric, PointId, seed_graph};
/// use courier_service::RouteOrchestrator;
///
/// let graph = MemoryGraph::default();
/// seed_graph(&graph)?;
/// let orchestrator = RouteOrchestrator::new(graph, &CacheConfig::default());
///
/// let route = orchestrator.all_paths(PointId(1), PointId(2))?;
/// assert_eq!(route.paths.len(), 5);
/// let fastest = orchestrator.best_path(PointId(1), PointId(2), Metric::Time)?;
/// assert!(fastest.is_some());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct RouteOrchestrator<R> {
    repository: R,
    cache: PathCache<CachedPaths>,
    flights: FlightTable,
}

impl<R> RouteOrchestrator<R>
where
    R: GraphRepository,
{
    /// Build an orchestrator with a cache configured by `config`.
    #[must_use]
    pub fn new(repository: R, config: &CacheConfig) -> Self {
        Self::with_cache(repository, PathCache::new(config))
    }

    /// Build an orchestrator around an existing cache.
    #[must_use]
    pub fn with_cache(repository: R, cache: PathCache<CachedPaths>) -> Self {
        Self {
            repository,
            cache,
            flights: FlightTable::default(),
        }
    }

    /// The repository paths are computed from.
    #[must_use]
    pub const fn repository(&self) -> &R {
        &self.repository
    }

    /// The result cache.
    #[must_use]
    pub const fn cache(&self) -> &PathCache<CachedPaths> {
        &self.cache
    }

    /// Every simple path from `origin` to `destination`.
    ///
    /// Served from the cache when possible; otherwise a snapshot is loaded,
    /// the paths are enumerated and the route is cached.
    ///
    /// # Errors
    ///
    /// Returns [`OrchestratorError::Repository`] when the snapshot cannot be
    /// loaded. Nothing is cached in that case.
    pub fn all_paths(
        &self,
        origin: PointId,
        destination: PointId,
    ) -> Result<Arc<Route>, OrchestratorError> {
        let key = CacheKey::all_paths(origin, destination);
        if let Some(route) = self.cached_route(&key) {
            return Ok(route);
        }
        self.flights.run(key, || {
            if let Some(route) = self.cached_route(&key) {
                return Ok(route);
            }
            let generation = self.cache.generation();
            let snapshot = GraphSnapshot::load(&self.repository)?;
            let route = Arc::new(courier_paths::all_paths(&snapshot, origin, destination));
            self.cache
                .set_if_current(key, CachedPaths::AllPaths(Arc::clone(&route)), generation);
            Ok(route)
        })
    }

    /// The path from `origin` to `destination` with the smallest total under
    /// `metric`, or `None` when no path exists.
    ///
    /// A cached all-paths route for the same pair is reused when present, so
    /// the repository is not consulted. Otherwise the branch-and-bound search
    /// runs on a fresh snapshot. Either way the result is cached.
    ///
    /// # Errors
    ///
    /// Returns [`OrchestratorError::Repository`] when the snapshot cannot be
    /// loaded.
    pub fn best_path(
        &self,
        origin: PointId,
        destination: PointId,
        metric: Metric,
    ) -> Result<Option<Arc<StepsCollection>>, OrchestratorError> {
        let key = CacheKey::best_path(origin, destination, metric);
        if let Some(best) = self.cached_best(&key) {
            return Ok(best);
        }
        self.flights.run(key, || {
            if let Some(best) = self.cached_best(&key) {
                return Ok(best);
            }
            let generation = self.cache.generation();
            let best = self
                .cached_route(&CacheKey::all_paths(origin, destination))
                .map_or_else(
                    || self.search(origin, destination, metric),
                    |route| {
                        debug!("deriving {key} from the cached all-paths route");
                        Ok(route.best_by(metric).cloned())
                    },
                )?
                .map(Arc::new);
            self.cache
                .set_if_current(key, CachedPaths::BestPath(best.clone()), generation);
            Ok(best)
        })
    }

    fn search(
        &self,
        origin: PointId,
        destination: PointId,
        metric: Metric,
    ) -> Result<Option<StepsCollection>, OrchestratorError> {
        let snapshot = GraphSnapshot::load(&self.repository)?;
        Ok(courier_paths::best_path(
            &snapshot,
            origin,
            destination,
            metric,
        ))
    }

    fn cached_route(&self, key: &CacheKey) -> Option<Arc<Route>> {
        match self.cache.try_get(key)? {
            CachedPaths::AllPaths(route) => Some(route),
            CachedPaths::BestPath(_) => None,
        }
    }

    fn cached_best(&self, key: &CacheKey) -> Option<Option<Arc<StepsCollection>>> {
        match self.cache.try_get(key)? {
            CachedPaths::BestPath(best) => Some(best),
            CachedPaths::AllPaths(_) => None,
        }
    }
}
