//! Command-line interface for querying and seeding Courier graph databases.
#![forbid(unsafe_code)]

use std::io::Write;

use camino::Utf8Path;
use clap::{Parser, Subcommand};
use courier_core::{RepositoryError, SqliteGraphStore};
use serde::Serialize;

mod error;
mod query;
mod seed;

pub use error::CliError;

use query::{BestArgs, PathsArgs};
use seed::SeedArgs;

pub(crate) const ARG_DB: &str = "db";
pub(crate) const ARG_ORIGIN: &str = "origin";
pub(crate) const ARG_DESTINATION: &str = "destination";
pub(crate) const ARG_METRIC: &str = "metric";
pub(crate) const ENV_SEED_DB: &str = "COURIER_CMDS_SEED_DB";
pub(crate) const ENV_PATHS_DB: &str = "COURIER_CMDS_PATHS_DB";
pub(crate) const ENV_PATHS_ORIGIN: &str = "COURIER_CMDS_PATHS_ORIGIN";
pub(crate) const ENV_PATHS_DESTINATION: &str = "COURIER_CMDS_PATHS_DESTINATION";
pub(crate) const ENV_BEST_DB: &str = "COURIER_CMDS_BEST_DB";
pub(crate) const ENV_BEST_ORIGIN: &str = "COURIER_CMDS_BEST_ORIGIN";
pub(crate) const ENV_BEST_DESTINATION: &str = "COURIER_CMDS_BEST_DESTINATION";

/// Run the Courier CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns a [`CliError`] when arguments or configuration are invalid, the
/// database cannot be used, or the query is rejected.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let mut stdout = std::io::stdout().lock();
    run_command(cli.command, &mut stdout)
}

fn run_command(command: Command, writer: &mut dyn Write) -> Result<(), CliError> {
    match command {
        Command::Seed(args) => seed::run_seed(args, writer),
        Command::Paths(args) => query::run_paths(args, writer),
        Command::Best(args) => query::run_best(args, writer),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "courier",
    about = "Path queries over a delivery graph stored in SQLite",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create a graph database holding the reference delivery graph.
    Seed(SeedArgs),
    /// List every simple path between two points.
    Paths(PathsArgs),
    /// Find the cheapest or fastest path between two points.
    Best(BestArgs),
}

pub(crate) fn open_store(path: &Utf8Path) -> Result<SqliteGraphStore, CliError> {
    SqliteGraphStore::open(path).map_err(|source| store_error(path, source))
}

pub(crate) fn store_error(path: &Utf8Path, source: RepositoryError) -> CliError {
    CliError::Store {
        path: path.to_path_buf(),
        source,
    }
}

pub(crate) fn write_json<T>(writer: &mut dyn Write, value: &T) -> Result<(), CliError>
where
    T: Serialize + ?Sized,
{
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerializeOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
mod tests;
