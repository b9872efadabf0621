//! Facade crate for the Courier route engine.
//!
//! This crate re-exports the domain types, the path searches, the result
//! cache and the query services, and exposes the SQLite graph store behind a
//! feature flag.

#![forbid(unsafe_code)]

pub use courier_cache::{CacheConfig, CacheKey, KeyPrefix, Namespace, PathCache};
pub use courier_core::{
    Amount, GraphRepository, GraphSnapshot, GraphStore, Metric, NewStep, Point, PointId,
    RepositoryError, Route, RouteBase, RouteBaseId, Step, StepId, StepsCollection, seed_graph,
};
pub use courier_paths::{all_paths, best_path};
pub use courier_service::{
    GraphEditor, OrchestratorError, RouteOrchestrator, RouteQueries, ServiceError,
    ValidationError,
};

#[cfg(feature = "store-sqlite")]
pub use courier_core::SqliteGraphStore;
