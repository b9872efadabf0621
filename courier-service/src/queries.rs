//! Path queries addressed by point description.

use std::sync::Arc;

use courier_core::{GraphRepository, Metric, Route, RouteBase, StepsCollection};
use log::debug;

use crate::validation::resolve_route_base;
use crate::{RouteOrchestrator, ServiceError};

/// Validates description-based requests and forwards them to a
/// [`RouteOrchestrator`].
///
/// Validation always reads the repository, so a route base deleted since a
/// result was cached is rejected rather than answered from the cache.
///
/// # Examples
///
/// ```
/// use courier_cache::CacheConfig;
/// use courier_core::test_support::MemoryGraph;
/// use courier_core::{Amount, seed_graph};
/// use courier_service::{RouteOrchestrator, RouteQueries};
///
/// let graph = MemoryGraph::default();
/// seed_graph(&graph)?;
/// let orchestrator = RouteOrchestrator::new(graph, &CacheConfig::default());
/// let queries = RouteQueries::new(&orchestrator);
///
/// let cheapest = queries.least_cost("A", "B")?.expect("a path exists");
/// assert_eq!(cheapest.total_cost, Amount::from_units(32));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct RouteQueries<'a, R> {
    orchestrator: &'a RouteOrchestrator<R>,
}

impl<'a, R> RouteQueries<'a, R>
where
    R: GraphRepository,
{
    /// Wrap `orchestrator`.
    #[must_use]
    pub const fn new(orchestrator: &'a RouteOrchestrator<R>) -> Self {
        Self { orchestrator }
    }

    /// Validate a query between two point descriptions and return the route
    /// base that permits it.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Validation`] when the points are equal or
    /// unknown, no route base is declared for them, the origin has no
    /// outgoing step or the destination no incoming step. Repository
    /// failures surface as [`ServiceError::Repository`].
    pub fn route_base(&self, origin: &str, destination: &str) -> Result<RouteBase, ServiceError> {
        resolve_route_base(self.orchestrator.repository(), origin, destination)
    }

    /// Every path between two points.
    ///
    /// # Errors
    ///
    /// Fails as [`route_base`](Self::route_base) does, or with
    /// [`ServiceError::Orchestrator`] when the paths cannot be computed.
    pub fn all_paths(&self, origin: &str, destination: &str) -> Result<Arc<Route>, ServiceError> {
        let route_base = self.route_base(origin, destination)?;
        debug!("all paths requested from {origin:?} to {destination:?}");
        Ok(self
            .orchestrator
            .all_paths(route_base.origin, route_base.destination)?)
    }

    /// The cheapest path between two points, if any.
    ///
    /// # Errors
    ///
    /// Fails as [`all_paths`](Self::all_paths) does.
    pub fn least_cost(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<Option<Arc<StepsCollection>>, ServiceError> {
        self.best(origin, destination, Metric::Cost)
    }

    /// The fastest path between two points, if any.
    ///
    /// # Errors
    ///
    /// Fails as [`all_paths`](Self::all_paths) does.
    pub fn least_time(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<Option<Arc<StepsCollection>>, ServiceError> {
        self.best(origin, destination, Metric::Time)
    }

    /// The best path between two points under `metric`, if any.
    ///
    /// # Errors
    ///
    /// Fails as [`all_paths`](Self::all_paths) does.
    pub fn best(
        &self,
        origin: &str,
        destination: &str,
        metric: Metric,
    ) -> Result<Option<Arc<StepsCollection>>, ServiceError> {
        let route_base = self.route_base(origin, destination)?;
        debug!("least {metric} path requested from {origin:?} to {destination:?}");
        Ok(self
            .orchestrator
            .best_path(route_base.origin, route_base.destination, metric)?)
    }
}
