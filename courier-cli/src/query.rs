//! Path query commands (`paths` and `best`) for the Courier CLI.

use std::io::Write;
use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use courier_cache::CacheConfig;
use courier_core::{Metric, Route, SqliteGraphStore, StepsCollection};
use courier_service::{RouteOrchestrator, RouteQueries};
use log::debug;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_DB, ARG_DESTINATION, ARG_METRIC, ARG_ORIGIN, CliError, ENV_BEST_DB, ENV_BEST_DESTINATION,
    ENV_BEST_ORIGIN, ENV_PATHS_DB, ENV_PATHS_DESTINATION, ENV_PATHS_ORIGIN, open_store,
    write_json,
};

/// CLI arguments for the `paths` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "paths",
    long_about = "Enumerate every simple path between two points named by \
                 their descriptions. A route base must be declared for the \
                 pair. The route is printed as JSON.",
    about = "List every path between two points"
)]
#[ortho_config(prefix = "COURIER")]
pub(crate) struct PathsArgs {
    /// Path to the SQLite graph database.
    #[arg(long = ARG_DB, value_name = "path")]
    #[serde(default)]
    pub(crate) db: Option<Utf8PathBuf>,
    /// Description of the point the paths start from.
    #[arg(long = ARG_ORIGIN, value_name = "point")]
    #[serde(default)]
    pub(crate) origin: Option<String>,
    /// Description of the point the paths end at.
    #[arg(long = ARG_DESTINATION, value_name = "point")]
    #[serde(default)]
    pub(crate) destination: Option<String>,
}

/// CLI arguments for the `best` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "best",
    long_about = "Find the path between two points with the lowest total \
                 cost or time. Prints the path as JSON, or null when the \
                 points are not connected.",
    about = "Find the cheapest or fastest path between two points"
)]
#[ortho_config(prefix = "COURIER")]
pub(crate) struct BestArgs {
    /// Path to the SQLite graph database.
    #[arg(long = ARG_DB, value_name = "path")]
    #[serde(default)]
    pub(crate) db: Option<Utf8PathBuf>,
    /// Description of the point the path starts from.
    #[arg(long = ARG_ORIGIN, value_name = "point")]
    #[serde(default)]
    pub(crate) origin: Option<String>,
    /// Description of the point the path ends at.
    #[arg(long = ARG_DESTINATION, value_name = "point")]
    #[serde(default)]
    pub(crate) destination: Option<String>,
    /// Quantity to minimise: `cost` (default) or `time`.
    #[arg(long = ARG_METRIC, value_name = "cost|time")]
    #[serde(default)]
    pub(crate) metric: Option<Metric>,
}

impl PathsArgs {
    fn into_config(self) -> Result<QueryConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        QueryConfig::try_from(merged)
    }
}

impl BestArgs {
    fn into_config(self) -> Result<BestConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        BestConfig::try_from(merged)
    }
}

/// Resolved configuration shared by the query commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct QueryConfig {
    pub(crate) db: Utf8PathBuf,
    pub(crate) origin: String,
    pub(crate) destination: String,
}

/// Resolved `best` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BestConfig {
    pub(crate) query: QueryConfig,
    pub(crate) metric: Metric,
}

fn required<T>(value: Option<T>, field: &'static str, env: &'static str) -> Result<T, CliError> {
    value.ok_or(CliError::MissingArgument { field, env })
}

impl TryFrom<PathsArgs> for QueryConfig {
    type Error = CliError;

    fn try_from(args: PathsArgs) -> Result<Self, Self::Error> {
        Ok(Self {
            db: required(args.db, ARG_DB, ENV_PATHS_DB)?,
            origin: required(args.origin, ARG_ORIGIN, ENV_PATHS_ORIGIN)?,
            destination: required(args.destination, ARG_DESTINATION, ENV_PATHS_DESTINATION)?,
        })
    }
}

impl TryFrom<BestArgs> for BestConfig {
    type Error = CliError;

    fn try_from(args: BestArgs) -> Result<Self, Self::Error> {
        let query = QueryConfig {
            db: required(args.db, ARG_DB, ENV_BEST_DB)?,
            origin: required(args.origin, ARG_ORIGIN, ENV_BEST_ORIGIN)?,
            destination: required(args.destination, ARG_DESTINATION, ENV_BEST_DESTINATION)?,
        };
        Ok(Self {
            query,
            metric: args.metric.unwrap_or(Metric::Cost),
        })
    }
}

pub(crate) fn run_paths(args: PathsArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let route = execute_paths(&args.into_config()?)?;
    write_json(writer, route.as_ref())
}

pub(crate) fn run_best(args: BestArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let best = execute_best(&args.into_config()?)?;
    write_json(writer, &best.as_deref())
}

pub(crate) fn execute_paths(config: &QueryConfig) -> Result<Arc<Route>, CliError> {
    let orchestrator = open_orchestrator(&config.db)?;
    let route = RouteQueries::new(&orchestrator).all_paths(&config.origin, &config.destination)?;
    debug!(
        "found {} paths from {:?} to {:?}",
        route.paths.len(),
        config.origin,
        config.destination
    );
    Ok(route)
}

pub(crate) fn execute_best(config: &BestConfig) -> Result<Option<Arc<StepsCollection>>, CliError> {
    let query = &config.query;
    let orchestrator = open_orchestrator(&query.db)?;
    Ok(RouteQueries::new(&orchestrator).best(&query.origin, &query.destination, config.metric)?)
}

fn open_orchestrator(path: &Utf8Path) -> Result<RouteOrchestrator<SqliteGraphStore>, CliError> {
    if !path.is_file() {
        return Err(CliError::MissingDatabase {
            path: path.to_path_buf(),
        });
    }
    let store = open_store(path)?;
    // A process answers a single query, so there is nothing to reuse.
    Ok(RouteOrchestrator::new(store, &CacheConfig::disabled()))
}

#[cfg(test)]
pub(crate) fn best_config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<BestConfig, CliError> {
    let merged = BestArgs::merge_from_layers(layers).map_err(CliError::from)?;
    BestConfig::try_from(merged)
}
