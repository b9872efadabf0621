//! Focused unit tests covering the seed command.

use super::helpers::{Workspace, output_json};
use super::*;
use crate::seed::{SeedConfig, config_from_layers_for_test, seed_database};
use courier_core::GraphRepository;
use rstest::rstest;

#[rstest]
fn converting_seed_without_database_errors() {
    let err = SeedConfig::try_from(SeedArgs::default()).expect_err("missing db should error");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_DB);
            assert_eq!(env, ENV_SEED_DB);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn seed_reports_what_it_wrote() {
    let workspace = Workspace::empty();
    let mut buffer = Vec::new();
    run_command(
        Command::Seed(SeedArgs {
            db: Some(workspace.db.clone()),
        }),
        &mut buffer,
    )
    .expect("seed succeeds");

    let summary = output_json(&buffer);
    assert_eq!(summary["database"], workspace.db.as_str());
    assert_eq!(summary["points"], 9);
    assert_eq!(summary["steps"], 11);
    assert_eq!(summary["route_bases"], 1);

    let store = open_store(&workspace.db).expect("reopen database");
    assert_eq!(store.list_points().expect("points").len(), 9);
}

#[rstest]
fn seeding_twice_is_refused() {
    let workspace = Workspace::seeded();
    let err = seed_database(&workspace.db).expect_err("second seed should fail");
    match err {
        CliError::DatabaseNotEmpty { path } => assert_eq!(path, workspace.db),
        other => panic!("expected DatabaseNotEmpty, found {other:?}"),
    }
}

#[rstest]
fn seed_parses_database_flag() {
    let cli = Cli::try_parse_from(["courier", "seed", "--db", "graph.db"]).expect("parse seed");
    match cli.command {
        Command::Seed(args) => assert_eq!(args.db.as_deref().map(|p| p.as_str()), Some("graph.db")),
        other => panic!("expected seed command, found {other:?}"),
    }
}

#[rstest]
fn merge_layers_reads_database_from_environment() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_file(json!({ "db": "from-file.db" }), None);
    composer.push_environment(json!({ "db": "from-env.db" }));

    let config = config_from_layers_for_test(composer.layers()).expect("merged config");
    assert_eq!(config.db.as_str(), "from-env.db");
}

#[rstest]
fn merge_layers_maps_configuration_errors() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_cli(json!({ "db": 42 }));

    let err = config_from_layers_for_test(composer.layers())
        .expect_err("invalid layer should map to CliError::Configuration");
    match err {
        CliError::Configuration(_) => {}
        other => panic!("expected CliError::Configuration, found {other:?}"),
    }
}
