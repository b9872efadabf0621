//! Exhaustive enumeration of simple paths.

use courier_core::{GraphSnapshot, PointId, Route, Step, StepsCollection};
use log::debug;

use crate::traversal::{Totals, Visit, collect, walk};

#[derive(Default)]
struct Collector {
    paths: Vec<StepsCollection>,
}

impl<'a> Visit<'a> for Collector {
    fn arrive(&mut self, path: &[&'a Step], last: &'a Step, _reached: Totals) {
        self.paths.push(collect(path, last));
    }
}

/// Enumerate every simple path from `origin` to `destination`.
///
/// A path never visits a point twice and never consists of a single step
/// from `origin` straight to `destination`. Paths are reported in discovery
/// order: steps leaving each point are tried in snapshot order. Unknown
/// points and disconnected pairs produce a route with no paths.
///
/// # Examples
///
/// ```
/// use courier_core::{Amount, GraphSnapshot, Point, PointId, Step};
/// use courier_paths::all_paths;
///
/// let snapshot = GraphSnapshot::from_parts(
///     vec![Point::new(1, "A"), Point::new(2, "B"), Point::new(3, "C")],
///     vec![
///         Step::new(1, 1, 2, Amount::from_units(1), Amount::from_units(1)),
///         Step::new(2, 1, 3, Amount::from_units(1), Amount::from_units(1)),
///         Step::new(3, 3, 2, Amount::from_units(1), Amount::from_units(1)),
///     ],
/// );
/// let route = all_paths(&snapshot, PointId(1), PointId(2));
/// assert_eq!(route.paths.len(), 1);
/// assert_eq!(route.paths[0].total_time, Amount::from_units(2));
/// ```
#[must_use]
pub fn all_paths(snapshot: &GraphSnapshot, origin: PointId, destination: PointId) -> Route {
    let mut collector = Collector::default();
    walk(snapshot, origin, destination, &mut collector);
    debug!(
        "enumerated {} paths from {origin} to {destination}",
        collector.paths.len()
    );
    Route::new(origin, destination, collector.paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use courier_core::test_support::{numbered_points, step};
    use courier_core::{Amount, Point};
    use rstest::rstest;

    fn points_of(route: &Route) -> Vec<Vec<u64>> {
        route
            .paths
            .iter()
            .map(|path| path.points().map(|point| point.0).collect())
            .collect()
    }

    #[rstest]
    fn direct_step_is_not_a_path() {
        let snapshot = GraphSnapshot::from_parts(numbered_points(2), vec![step(1, 1, 2, 1, 1)]);
        assert!(all_paths(&snapshot, PointId(1), PointId(2)).paths.is_empty());
    }

    #[rstest]
    fn returning_to_the_origin_is_skipped() {
        let snapshot = GraphSnapshot::from_parts(
            numbered_points(3),
            vec![
                step(1, 1, 2, 1, 1),
                step(2, 1, 3, 1, 1),
                step(3, 3, 1, 1, 1),
                step(4, 3, 2, 1, 1),
            ],
        );
        let route = all_paths(&snapshot, PointId(1), PointId(2));
        assert_eq!(points_of(&route), vec![vec![1, 3, 2]]);
    }

    #[rstest]
    fn cycles_do_not_revisit_points() {
        let snapshot = GraphSnapshot::from_parts(
            numbered_points(4),
            vec![
                step(1, 1, 3, 1, 1),
                step(2, 3, 4, 1, 1),
                step(3, 4, 3, 1, 1),
                step(4, 4, 2, 1, 1),
            ],
        );
        let route = all_paths(&snapshot, PointId(1), PointId(2));
        assert_eq!(points_of(&route), vec![vec![1, 3, 4, 2]]);
    }

    #[rstest]
    fn paths_stop_at_the_destination() {
        // The destination has an outgoing step that must not be followed.
        let snapshot = GraphSnapshot::from_parts(
            numbered_points(4),
            vec![
                step(1, 1, 3, 1, 1),
                step(2, 3, 2, 1, 1),
                step(3, 2, 4, 1, 1),
                step(4, 4, 2, 1, 1),
            ],
        );
        let route = all_paths(&snapshot, PointId(1), PointId(2));
        assert_eq!(points_of(&route), vec![vec![1, 3, 2]]);
    }

    #[rstest]
    #[case(PointId(1), PointId(9))]
    #[case(PointId(9), PointId(1))]
    #[case(PointId(2), PointId(1))]
    fn unreachable_pairs_yield_no_paths(#[case] origin: PointId, #[case] destination: PointId) {
        let snapshot = GraphSnapshot::from_parts(
            numbered_points(3),
            vec![step(1, 1, 3, 1, 1), step(2, 3, 2, 1, 1)],
        );
        let route = all_paths(&snapshot, origin, destination);
        assert_eq!(route.origin, origin);
        assert_eq!(route.destination, destination);
        assert!(route.paths.is_empty());
    }

    #[rstest]
    fn totals_are_summed_per_path() {
        let snapshot = GraphSnapshot::from_parts(
            vec![Point::new(1, "A"), Point::new(2, "B"), Point::new(3, "C")],
            vec![
                Step::new(1, 1, 3, Amount::from_millis(1_500), Amount::from_units(2)),
                Step::new(2, 3, 2, Amount::from_millis(250), Amount::from_units(3)),
            ],
        );
        let route = all_paths(&snapshot, PointId(1), PointId(2));
        let path = route.paths.first().expect("one path");
        assert_eq!(path.total_time, Amount::from_millis(1_750));
        assert_eq!(path.total_cost, Amount::from_units(5));
    }
}
