//! Seed command implementation for the Courier CLI.

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use courier_core::{GraphRepository, SEED_POINTS, SEED_ROUTE_BASES, SEED_STEPS, seed_graph};
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{ARG_DB, CliError, ENV_SEED_DB, open_store, store_error, write_json};

/// CLI arguments for the `seed` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "seed",
    long_about = "Create the graph schema in a SQLite database and load the \
                 nine-point reference delivery graph with its route base \
                 from A to B. The database must not already hold points.",
    about = "Load the reference delivery graph"
)]
#[ortho_config(prefix = "COURIER")]
pub(crate) struct SeedArgs {
    /// Path to the SQLite graph database to create or fill.
    #[arg(long = ARG_DB, value_name = "path")]
    #[serde(default)]
    pub(crate) db: Option<Utf8PathBuf>,
}

impl SeedArgs {
    fn into_config(self) -> Result<SeedConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        SeedConfig::try_from(merged)
    }
}

/// Resolved `seed` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SeedConfig {
    pub(crate) db: Utf8PathBuf,
}

impl TryFrom<SeedArgs> for SeedConfig {
    type Error = CliError;

    fn try_from(args: SeedArgs) -> Result<Self, Self::Error> {
        let db = args.db.ok_or(CliError::MissingArgument {
            field: ARG_DB,
            env: ENV_SEED_DB,
        })?;
        Ok(Self { db })
    }
}

/// What `seed` wrote, echoed back as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct SeedSummary {
    pub(crate) database: Utf8PathBuf,
    pub(crate) points: usize,
    pub(crate) steps: usize,
    pub(crate) route_bases: usize,
}

pub(crate) fn run_seed(args: SeedArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let summary = seed_database(&config.db)?;
    write_json(writer, &summary)
}

pub(crate) fn seed_database(path: &Utf8Path) -> Result<SeedSummary, CliError> {
    let store = open_store(path)?;
    let existing = store
        .list_points()
        .map_err(|source| store_error(path, source))?;
    if !existing.is_empty() {
        return Err(CliError::DatabaseNotEmpty {
            path: path.to_path_buf(),
        });
    }
    seed_graph(&store).map_err(|source| store_error(path, source))?;
    info!("seeded the reference graph into {path}");
    Ok(SeedSummary {
        database: path.to_path_buf(),
        points: SEED_POINTS.len(),
        steps: SEED_STEPS.len(),
        route_bases: SEED_ROUTE_BASES.len(),
    })
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<SeedConfig, CliError> {
    let merged = SeedArgs::merge_from_layers(layers).map_err(CliError::from)?;
    SeedConfig::try_from(merged)
}
