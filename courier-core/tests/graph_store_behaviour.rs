//! Behavioural tests for `SqliteGraphStore` and snapshot loading using
//! rstest-bdd.
#![cfg(feature = "store-sqlite")]

use std::cell::RefCell;

use courier_core::{GraphRepository, GraphSnapshot, GraphStore, SqliteGraphStore, seed_graph};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tempfile::TempDir;

/// Shared state for graph store scenarios.
struct StoreWorld {
    temp_dir: TempDir,
    store: RefCell<Option<SqliteGraphStore>>,
    snapshot: RefCell<Option<GraphSnapshot>>,
}

impl StoreWorld {
    fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("create temp dir"),
            store: RefCell::new(None),
            snapshot: RefCell::new(None),
        }
    }

    fn open(&self) -> SqliteGraphStore {
        let path = self.temp_dir.path().join("graph.db");
        SqliteGraphStore::open(path).expect("open SQLite graph store")
    }

    fn with_store<T>(&self, action: impl FnOnce(&SqliteGraphStore) -> T) -> T {
        let borrowed = self.store.borrow();
        let store = borrowed.as_ref().expect("store should be opened first");
        action(store)
    }

    fn with_snapshot<T>(&self, action: impl FnOnce(&GraphSnapshot) -> T) -> T {
        let borrowed = self.snapshot.borrow();
        let snapshot = borrowed.as_ref().expect("snapshot should be loaded first");
        action(snapshot)
    }
}

#[fixture]
fn world() -> StoreWorld {
    StoreWorld::new()
}

#[given("a SQLite graph store seeded with the reference graph")]
fn given_seeded_store(world: &StoreWorld) {
    let store = world.open();
    seed_graph(&store).expect("seed store");
    world.store.replace(Some(store));
}

#[given("an empty SQLite graph store")]
fn given_empty_store(world: &StoreWorld) {
    world.store.replace(Some(world.open()));
}

#[when("I delete point C")]
fn delete_point_c(world: &StoreWorld) {
    world.with_store(|store| {
        let point = store
            .point_by_description("C")
            .expect("query point")
            .expect("point C exists");
        store.delete_point(point.id).expect("delete point");
    });
}

#[when("I load a graph snapshot")]
fn load_snapshot(world: &StoreWorld) {
    let snapshot = world.with_store(|store| GraphSnapshot::load(store).expect("load snapshot"));
    world.snapshot.replace(Some(snapshot));
}

#[then("the snapshot holds {points} points and {steps} steps")]
fn snapshot_size(world: &StoreWorld, points: usize, steps: usize) {
    world.with_snapshot(|snapshot| {
        assert_eq!(snapshot.point_count(), points, "unexpected point count");
        assert_eq!(snapshot.step_count(), steps, "unexpected step count");
    });
}

#[then("point A has {count} outgoing steps")]
fn outgoing_from_a(world: &StoreWorld, count: usize) {
    let a = world.with_store(|store| {
        store
            .point_by_description("A")
            .expect("query point")
            .expect("point A exists")
    });
    world.with_snapshot(|snapshot| assert_eq!(snapshot.outgoing(a.id).len(), count));
}

#[scenario(path = "tests/features/graph_store.feature", index = 0)]
fn seeded_snapshot(world: StoreWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/graph_store.feature", index = 1)]
fn delete_cascades(world: StoreWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/graph_store.feature", index = 2)]
fn empty_snapshot(world: StoreWorld) {
    let _ = world;
}
