//! Error types emitted by the Courier CLI.
//!
//! Keep this error type reasonably small, as every command helper returns
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use courier_core::RepositoryError;
use courier_service::ServiceError;
use thiserror::Error;

/// Errors emitted by the Courier CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Flag name without the leading dashes.
        field: &'static str,
        /// Environment variable that can supply the value.
        env: &'static str,
    },
    /// A query named a database file that does not exist.
    #[error("database {path:?} does not exist; run `courier seed` first")]
    MissingDatabase {
        /// Path given for the database.
        path: Utf8PathBuf,
    },
    /// Seeding was asked for on a database that already holds points.
    #[error("database {path:?} already holds a graph")]
    DatabaseNotEmpty {
        /// Path given for the database.
        path: Utf8PathBuf,
    },
    /// Opening or reading the graph database failed.
    #[error("graph store at {path:?} failed: {source}")]
    Store {
        /// Path given for the database.
        path: Utf8PathBuf,
        /// Underlying repository failure.
        #[source]
        source: RepositoryError,
    },
    /// The query was rejected or could not be answered.
    #[error(transparent)]
    Query(#[from] ServiceError),
    /// Serializing the result failed.
    #[error("failed to serialize result: {0}")]
    SerializeOutput(#[source] serde_json::Error),
    /// Writing the result failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
