//! Error types for route queries and graph editing.

use courier_core::{PointId, RepositoryError, RouteBaseId, StepId};
use thiserror::Error;

/// A request broke a rule of the delivery graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Origin and destination (or start and end) name the same point.
    #[error("origin and destination must be different points")]
    EqualPoints,
    /// No point carries the given description.
    #[error("point {description:?} was not found")]
    PointNotFound {
        /// Description that was looked up.
        description: String,
    },
    /// Path queries are not permitted between the two points.
    #[error("no route base is declared between the given points")]
    RouteBaseNotDeclared,
    /// The origin has no outgoing step, so no path can start there.
    #[error("no step leaves the origin point")]
    NoDepartingStep,
    /// The destination has no incoming step, so no path can end there.
    #[error("no step arrives at the destination point")]
    NoArrivingStep,
    /// A point description was empty or whitespace.
    #[error("point description must not be blank")]
    BlankDescription,
    /// Another point already uses the description.
    #[error("point description {description:?} is already in use")]
    DescriptionInUse {
        /// The contested description.
        description: String,
    },
    /// No point has the given identifier.
    #[error("point {id} was not found")]
    PointMissing {
        /// Identifier that was looked up.
        id: PointId,
    },
    /// A step already links the two points.
    #[error("a step from point {start} to point {end} already exists")]
    StepExists {
        /// Start of the existing step.
        start: PointId,
        /// End of the existing step.
        end: PointId,
    },
    /// No step has the given identifier.
    #[error("step {id} was not found")]
    StepMissing {
        /// Identifier that was looked up.
        id: StepId,
    },
    /// A new step's time or cost was zero.
    #[error("step time and cost must be positive")]
    NonPositiveAmount,
    /// A route base already covers the two points.
    #[error("a route base from point {origin} to point {destination} already exists")]
    RouteBaseExists {
        /// Origin of the existing route base.
        origin: PointId,
        /// Destination of the existing route base.
        destination: PointId,
    },
    /// No route base has the given identifier.
    #[error("route base {id} was not found")]
    RouteBaseMissing {
        /// Identifier that was looked up.
        id: RouteBaseId,
    },
}

/// Errors raised while computing paths.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// Loading the graph snapshot failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Errors returned by [`RouteQueries`](crate::RouteQueries) and
/// [`GraphEditor`](crate::GraphEditor).
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request was rejected.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The graph store failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    /// Path computation failed.
    #[error(transparent)]
    Orchestrator(#[from] OrchestratorError),
}
