//! Behavioural tests for cached route queries and graph edits using
//! rstest-bdd.

use std::cell::RefCell;
use std::sync::Arc;

use courier_cache::CacheConfig;
use courier_core::test_support::MemoryGraph;
use courier_core::{Amount, Route, StepsCollection, seed_graph};
use courier_service::{
    GraphEditor, RouteOrchestrator, RouteQueries, ServiceError, ValidationError,
};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

struct QueryWorld {
    orchestrator: RefCell<Option<RouteOrchestrator<MemoryGraph>>>,
    route: RefCell<Option<Result<Arc<Route>, ServiceError>>>,
    best: RefCell<Option<Arc<StepsCollection>>>,
}

impl QueryWorld {
    fn new() -> Self {
        Self {
            orchestrator: RefCell::new(None),
            route: RefCell::new(None),
            best: RefCell::new(None),
        }
    }

    fn with_orchestrator<T>(
        &self,
        action: impl FnOnce(&RouteOrchestrator<MemoryGraph>) -> T,
    ) -> T {
        let borrowed = self.orchestrator.borrow();
        let orchestrator = borrowed
            .as_ref()
            .expect("graph should be prepared first");
        action(orchestrator)
    }

    fn request_all_paths(&self, origin: &str, destination: &str) {
        let result = self.with_orchestrator(|orchestrator| {
            RouteQueries::new(orchestrator).all_paths(origin, destination)
        });
        self.route.replace(Some(result));
    }
}

#[fixture]
fn world() -> QueryWorld {
    QueryWorld::new()
}

#[given("the reference delivery graph with caching enabled")]
fn given_reference_graph(world: &QueryWorld) {
    let graph = MemoryGraph::default();
    seed_graph(&graph).expect("seed reference graph");
    world
        .orchestrator
        .replace(Some(RouteOrchestrator::new(graph, &CacheConfig::default())));
}

#[when("I request all paths from {origin} to {destination}")]
fn request_once(world: &QueryWorld, origin: String, destination: String) {
    world.request_all_paths(&origin, &destination);
}

#[when("I request the least cost path from {origin} to {destination}")]
fn request_least_cost(world: &QueryWorld, origin: String, destination: String) {
    let best = world.with_orchestrator(|orchestrator| {
        RouteQueries::new(orchestrator)
            .least_cost(&origin, &destination)
            .expect("least cost query")
    });
    world.best.replace(best);
}

#[when("I add a step from {start} to {end} taking {time} and costing {cost}")]
fn add_step(world: &QueryWorld, start: String, end: String, time: u64, cost: u64) {
    world.with_orchestrator(|orchestrator| {
        GraphEditor::new(orchestrator)
            .create_step(&start, &end, Amount::from_units(time), Amount::from_units(cost))
            .expect("create step");
    });
}

#[then("{count} paths are returned")]
fn paths_returned(world: &QueryWorld, count: usize) {
    let route = world.route.borrow();
    let result = route.as_ref().expect("a query should have run");
    let paths = result.as_ref().expect("query should succeed");
    assert_eq!(paths.paths.len(), count);
}

#[then("the best path costs {cost}")]
fn best_costs(world: &QueryWorld, cost: u64) {
    let best = world.best.borrow();
    let path = best.as_ref().expect("a best path should exist");
    assert_eq!(path.total_cost, Amount::from_units(cost));
}

#[then("the number of graph loads is {count}")]
fn graph_loads(world: &QueryWorld, count: usize) {
    let reads = world.with_orchestrator(|orchestrator| orchestrator.repository().point_listings());
    assert_eq!(reads, count, "unexpected number of snapshot loads");
}

#[then("the request is rejected because no route base is declared")]
fn rejected_without_route_base(world: &QueryWorld) {
    let route = world.route.borrow();
    let result = route.as_ref().expect("a query should have run");
    assert!(matches!(
        result,
        Err(ServiceError::Validation(
            ValidationError::RouteBaseNotDeclared
        ))
    ));
}

#[scenario(path = "tests/features/route_queries.feature", index = 0)]
fn repeated_queries(world: QueryWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/route_queries.feature", index = 1)]
fn derived_best_path(world: QueryWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/route_queries.feature", index = 2)]
fn edits_invalidate(world: QueryWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/route_queries.feature", index = 3)]
fn undeclared_route_base(world: QueryWorld) {
    let _ = world;
}
