//! Data access traits for the delivery graph.
//!
//! [`GraphRepository`] is the read side consumed by the snapshot loader and
//! by request validation. [`GraphStore`] extends it with the mutations used
//! by the graph editor. Implementations must be safe to share across
//! threads; they use interior mutability for writes.

use std::error::Error as StdError;

use thiserror::Error;

use crate::{Amount, Point, PointId, RouteBase, RouteBaseId, Step, StepId};

/// Errors raised by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The underlying storage failed.
    #[error("graph repository backend failed: {source}")]
    Backend {
        /// Error reported by the storage layer.
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
    /// A lock guarding the storage was poisoned by a panicking writer.
    #[error("graph repository lock was poisoned")]
    Poisoned,
}

impl RepositoryError {
    /// Wrap a storage failure.
    pub fn backend<E>(source: E) -> Self
    where
        E: Into<Box<dyn StdError + Send + Sync>>,
    {
        Self::Backend {
            source: source.into(),
        }
    }
}

#[cfg(feature = "store-sqlite")]
impl From<rusqlite::Error> for RepositoryError {
    fn from(source: rusqlite::Error) -> Self {
        Self::backend(source)
    }
}

/// Read access to points, steps and route bases.
///
/// # Examples
///
/// ```rust
/// use courier_core::{GraphRepository, Point, PointId, RepositoryError, RouteBase,
///     RouteBaseId, Step, StepId};
///
/// struct Empty;
///
/// impl GraphRepository for Empty {
///     fn list_points(&self) -> Result<Vec<Point>, RepositoryError> { Ok(Vec::new()) }
///     fn list_outgoing_steps(&self, _: PointId) -> Result<Vec<Step>, RepositoryError> {
///         Ok(Vec::new())
///     }
///     fn list_incoming_steps(&self, _: PointId) -> Result<Vec<Step>, RepositoryError> {
///         Ok(Vec::new())
///     }
///     fn point(&self, _: PointId) -> Result<Option<Point>, RepositoryError> { Ok(None) }
///     fn point_by_description(&self, _: &str) -> Result<Option<Point>, RepositoryError> {
///         Ok(None)
///     }
///     fn step(&self, _: StepId) -> Result<Option<Step>, RepositoryError> { Ok(None) }
///     fn step_between(&self, _: PointId, _: PointId) -> Result<Option<Step>, RepositoryError> {
///         Ok(None)
///     }
///     fn route_base(&self, _: RouteBaseId) -> Result<Option<RouteBase>, RepositoryError> {
///         Ok(None)
///     }
///     fn route_base_between(
///         &self,
///         _: PointId,
///         _: PointId,
///     ) -> Result<Option<RouteBase>, RepositoryError> {
///         Ok(None)
///     }
/// }
///
/// assert!(Empty.list_points()?.is_empty());
/// # Ok::<(), RepositoryError>(())
/// ```
pub trait GraphRepository {
    /// Return every point in the graph.
    fn list_points(&self) -> Result<Vec<Point>, RepositoryError>;

    /// Return the steps leaving `point`, in storage order.
    fn list_outgoing_steps(&self, point: PointId) -> Result<Vec<Step>, RepositoryError>;

    /// Return the steps arriving at `point`, in storage order.
    fn list_incoming_steps(&self, point: PointId) -> Result<Vec<Step>, RepositoryError>;

    /// Look up a point by identifier.
    fn point(&self, id: PointId) -> Result<Option<Point>, RepositoryError>;

    /// Look up a point by its unique description.
    fn point_by_description(&self, description: &str) -> Result<Option<Point>, RepositoryError>;

    /// Look up a step by identifier.
    fn step(&self, id: StepId) -> Result<Option<Step>, RepositoryError>;

    /// Look up the step linking `start` to `end`, if any.
    fn step_between(&self, start: PointId, end: PointId)
    -> Result<Option<Step>, RepositoryError>;

    /// Look up a route base by identifier.
    fn route_base(&self, id: RouteBaseId) -> Result<Option<RouteBase>, RepositoryError>;

    /// Look up the route base declared for `origin` and `destination`.
    fn route_base_between(
        &self,
        origin: PointId,
        destination: PointId,
    ) -> Result<Option<RouteBase>, RepositoryError>;
}

/// Fields of a step that is about to be stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewStep {
    /// Point the step leaves from.
    pub start: PointId,
    /// Point the step arrives at.
    pub end: PointId,
    /// Travel time along the step.
    pub time: Amount,
    /// Cost of taking the step.
    pub cost: Amount,
}

/// Write access to the graph.
///
/// Stores assign identifiers on insert. Deleting a point also deletes the
/// steps and route bases that reference it.
pub trait GraphStore: GraphRepository {
    /// Store a new point.
    fn insert_point(&self, description: &str) -> Result<Point, RepositoryError>;

    /// Replace the stored point with the same identifier.
    fn update_point(&self, point: &Point) -> Result<(), RepositoryError>;

    /// Remove a point together with the steps and route bases using it.
    fn delete_point(&self, id: PointId) -> Result<(), RepositoryError>;

    /// Store a new step.
    fn insert_step(&self, step: NewStep) -> Result<Step, RepositoryError>;

    /// Replace the stored step with the same identifier.
    fn update_step(&self, step: &Step) -> Result<(), RepositoryError>;

    /// Remove a step.
    fn delete_step(&self, id: StepId) -> Result<(), RepositoryError>;

    /// Store a new route base.
    fn insert_route_base(
        &self,
        origin: PointId,
        destination: PointId,
    ) -> Result<RouteBase, RepositoryError>;

    /// Replace the stored route base with the same identifier.
    fn update_route_base(&self, route_base: &RouteBase) -> Result<(), RepositoryError>;

    /// Remove a route base.
    fn delete_route_base(&self, id: RouteBaseId) -> Result<(), RepositoryError>;
}
