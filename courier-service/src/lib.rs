//! Cached route queries and validated graph editing.
//!
//! [`RouteOrchestrator`] answers path queries by point id, consulting a
//! [`PathCache`](courier_cache::PathCache) before loading a snapshot and
//! running the searches from `courier_paths`. [`RouteQueries`] layers
//! description-based lookups and request validation on top, while
//! [`GraphEditor`] applies validated mutations to a
//! [`GraphStore`](courier_core::GraphStore) and invalidates the cached
//! results they affect.

#![forbid(unsafe_code)]

mod editor;
mod error;
mod flight;
mod orchestrator;
mod queries;
mod validation;

pub use editor::{GraphEditor, RouteBaseUpdate, StepUpdate};
pub use error::{OrchestratorError, ServiceError, ValidationError};
pub use orchestrator::{CachedPaths, RouteOrchestrator};
pub use queries::RouteQueries;
