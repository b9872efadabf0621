//! Core domain types for the Courier route engine.
//!
//! The crate models a directed, weighted delivery graph: [`Point`] values
//! connected by [`Step`] links that carry a time and a cost. It also defines
//! the repository seam ([`GraphRepository`], [`GraphStore`]) through which the
//! engine reads and edits the graph, and the [`GraphSnapshot`] loader that
//! turns repository contents into an adjacency structure for path searches.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod amount;
mod model;
mod repository;
mod seed;
mod snapshot;
pub mod store;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use amount::{Amount, AmountParseError};
pub use model::{
    Metric, MetricParseError, Point, PointId, Route, RouteBase, RouteBaseId, Step, StepId,
    StepsCollection,
};
pub use repository::{GraphRepository, GraphStore, NewStep, RepositoryError};
pub use seed::{SEED_POINTS, SEED_ROUTE_BASES, SEED_STEPS, seed_graph};
pub use snapshot::{GraphSnapshot, PointSteps};

#[cfg(feature = "store-sqlite")]
pub use store::SqliteGraphStore;
