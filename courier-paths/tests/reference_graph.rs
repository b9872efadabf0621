//! Path searches over the reference delivery graph.

use courier_core::test_support::MemoryGraph;
use courier_core::{Amount, GraphSnapshot, Metric, PointId, StepsCollection, seed_graph};
use courier_paths::{all_paths, best_path};
use rstest::{fixture, rstest};

const A: PointId = PointId(1);
const B: PointId = PointId(2);

#[fixture]
fn snapshot() -> GraphSnapshot {
    let graph = MemoryGraph::default();
    seed_graph(&graph).expect("seed reference graph");
    GraphSnapshot::load(&graph).expect("load snapshot")
}

fn labels(snapshot: &GraphSnapshot, path: &StepsCollection) -> String {
    path.points()
        .map(|id| {
            snapshot
                .entries()
                .iter()
                .find(|entry| entry.point.id == id)
                .map(|entry| entry.point.description.as_str())
                .expect("path points belong to the snapshot")
        })
        .collect()
}

#[rstest]
fn enumerates_the_five_paths(snapshot: GraphSnapshot) {
    let route = all_paths(&snapshot, A, B);
    let mut found: Vec<(String, Amount, Amount)> = route
        .paths
        .iter()
        .map(|path| (labels(&snapshot, path), path.total_time, path.total_cost))
        .collect();
    found.sort();
    let expected: Vec<(String, Amount, Amount)> = [
        ("ACB", 2, 32),
        ("AEDFGB", 141, 183),
        ("AEDFIB", 147, 115),
        ("AHEDFGB", 151, 180),
        ("AHEDFIB", 157, 112),
    ]
    .into_iter()
    .map(|(label, time, cost)| {
        (
            label.to_owned(),
            Amount::from_units(time),
            Amount::from_units(cost),
        )
    })
    .collect();
    assert_eq!(found, expected);
}

#[rstest]
#[case(Metric::Time, "ACB", 2)]
#[case(Metric::Cost, "ACB", 32)]
fn best_path_matches_reference(
    snapshot: GraphSnapshot,
    #[case] metric: Metric,
    #[case] expected: &str,
    #[case] total: u64,
) {
    let best = best_path(&snapshot, A, B, metric).expect("reference path exists");
    assert_eq!(labels(&snapshot, &best), expected);
    assert_eq!(best.total(metric), Amount::from_units(total));
    assert_eq!(best.total_time, Amount::from_units(2));
    assert_eq!(best.total_cost, Amount::from_units(32));
}

#[rstest]
#[case(Metric::Cost)]
#[case(Metric::Time)]
fn best_path_agrees_with_enumeration(snapshot: GraphSnapshot, #[case] metric: Metric) {
    let route = all_paths(&snapshot, A, B);
    let enumerated = route.best_by(metric).expect("paths exist");
    let searched = best_path(&snapshot, A, B, metric).expect("path exists");
    assert_eq!(&searched, enumerated);
}

#[rstest]
fn reverse_direction_has_no_paths(snapshot: GraphSnapshot) {
    assert!(all_paths(&snapshot, B, A).paths.is_empty());
    assert!(best_path(&snapshot, B, A, Metric::Cost).is_none());
    assert!(best_path(&snapshot, B, A, Metric::Time).is_none());
}
