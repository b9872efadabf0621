//! Property-based tests for the path searches.
//!
//! Random graphs of up to seven points are searched between their first two
//! points.
//!
//! # Invariants tested
//!
//! - **Shape:** every enumerated path is contiguous, starts at the origin,
//!   ends at the destination and visits no point twice.
//! - **No shortcut:** no enumerated path is the single direct step.
//! - **Agreement:** the branch-and-bound result exists exactly when
//!   enumeration finds a path, and its total equals the enumerated minimum.

use std::collections::{BTreeMap, HashSet};

use courier_core::test_support::numbered_points;
use courier_core::{Amount, GraphSnapshot, Metric, PointId, Step};
use courier_paths::{all_paths, best_path};
use proptest::prelude::*;

const ORIGIN: PointId = PointId(1);
const DESTINATION: PointId = PointId(2);

/// Graphs as `(point count, steps)`; at most one step per ordered pair.
fn graph_strategy() -> impl Strategy<Value = (u64, Vec<Step>)> {
    (2_u64..=7).prop_flat_map(|count| {
        let link = (1..=count, 1..=count, 0_u64..50_000, 0_u64..50_000);
        prop::collection::vec(link, 0..24).prop_map(move |links| {
            let unique: BTreeMap<(u64, u64), (u64, u64)> = links
                .into_iter()
                .filter(|(start, end, _, _)| start != end)
                .map(|(start, end, time, cost)| ((start, end), (time, cost)))
                .collect();
            let steps = unique
                .into_iter()
                .zip(1_u64..)
                .map(|(((start, end), (time, cost)), id)| {
                    Step::new(
                        id,
                        start,
                        end,
                        Amount::from_millis(time),
                        Amount::from_millis(cost),
                    )
                })
                .collect();
            (count, steps)
        })
    })
}

fn metric_strategy() -> impl Strategy<Value = Metric> {
    prop_oneof![Just(Metric::Cost), Just(Metric::Time)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn enumerated_paths_are_simple_and_connected((count, steps) in graph_strategy()) {
        let snapshot = GraphSnapshot::from_parts(numbered_points(count), steps);
        let route = all_paths(&snapshot, ORIGIN, DESTINATION);

        for path in &route.paths {
            prop_assert!(path.len() >= 2, "direct step reported as a path");
            prop_assert_eq!(path.steps.first().map(|step| step.start), Some(ORIGIN));
            prop_assert_eq!(path.steps.last().map(|step| step.end), Some(DESTINATION));
            for pair in path.steps.windows(2) {
                if let [before, after] = pair {
                    prop_assert_eq!(before.end, after.start);
                }
            }
            let mut seen = HashSet::new();
            for point in path.points() {
                prop_assert!(seen.insert(point), "point {} visited twice", point);
            }
        }
    }

    #[test]
    fn best_path_matches_enumerated_minimum(
        (count, steps) in graph_strategy(),
        metric in metric_strategy(),
    ) {
        let snapshot = GraphSnapshot::from_parts(numbered_points(count), steps);
        let route = all_paths(&snapshot, ORIGIN, DESTINATION);
        let searched = best_path(&snapshot, ORIGIN, DESTINATION, metric);

        let minimum = route.paths.iter().map(|path| path.total(metric)).min();
        prop_assert_eq!(searched.as_ref().map(|path| path.total(metric)), minimum);
        prop_assert_eq!(searched.as_ref(), route.best_by(metric));
    }
}
