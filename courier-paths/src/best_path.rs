//! Branch-and-bound search for the cheapest or fastest path.

use courier_core::{GraphSnapshot, Metric, PointId, Step, StepsCollection};
use log::debug;

use crate::traversal::{Totals, Visit, collect, walk};

struct Incumbent {
    metric: Metric,
    best: Option<StepsCollection>,
}

impl<'a> Visit<'a> for Incumbent {
    fn order(&self, mut steps: Vec<&'a Step>) -> Vec<&'a Step> {
        steps.sort_by_key(|step| step.weight(self.metric));
        steps
    }

    // A partial path that only ties the incumbent may still win on the
    // tie-break, so only strictly worse partial paths are pruned.
    fn admit(&self, reached: Totals) -> bool {
        self.best
            .as_ref()
            .is_none_or(|best| reached.get(self.metric) <= best.total(self.metric))
    }

    fn arrive(&mut self, path: &[&'a Step], last: &'a Step, _reached: Totals) {
        let candidate = collect(path, last);
        if self
            .best
            .as_ref()
            .is_none_or(|best| candidate.rank(best, self.metric).is_lt())
        {
            self.best = Some(candidate);
        }
    }
}

/// Find the simple path from `origin` to `destination` with the smallest
/// total under `metric`.
///
/// Follows the same rules as [`all_paths`](crate::all_paths): no revisited
/// points and no single direct step. Steps leaving each point are tried in
/// ascending weight, and any partial path whose total already exceeds the
/// best complete path is abandoned. Equally good paths are separated with
/// [`StepsCollection::rank`], so the answer matches
/// [`Route::best_by`](courier_core::Route::best_by) over the enumerated
/// paths. Returns `None` when no path exists.
///
/// # Examples
///
/// ```
/// use courier_core::{Amount, GraphSnapshot, Metric, Point, PointId, Step};
/// use courier_paths::best_path;
///
/// let snapshot = GraphSnapshot::from_parts(
///     vec![Point::new(1, "A"), Point::new(2, "B"), Point::new(3, "C"), Point::new(4, "D")],
///     vec![
///         Step::new(1, 1, 3, Amount::from_units(1), Amount::from_units(9)),
///         Step::new(2, 3, 2, Amount::from_units(1), Amount::from_units(9)),
///         Step::new(3, 1, 4, Amount::from_units(5), Amount::from_units(1)),
///         Step::new(4, 4, 2, Amount::from_units(5), Amount::from_units(1)),
///     ],
/// );
/// let cheapest = best_path(&snapshot, PointId(1), PointId(2), Metric::Cost).unwrap();
/// assert_eq!(cheapest.total_cost, Amount::from_units(2));
/// let fastest = best_path(&snapshot, PointId(1), PointId(2), Metric::Time).unwrap();
/// assert_eq!(fastest.total_time, Amount::from_units(2));
/// ```
#[must_use]
pub fn best_path(
    snapshot: &GraphSnapshot,
    origin: PointId,
    destination: PointId,
    metric: Metric,
) -> Option<StepsCollection> {
    let mut incumbent = Incumbent { metric, best: None };
    walk(snapshot, origin, destination, &mut incumbent);
    match &incumbent.best {
        Some(best) => debug!(
            "best {metric} path from {origin} to {destination} totals {}",
            best.total(metric)
        ),
        None => debug!("no {metric} path from {origin} to {destination}"),
    }
    incumbent.best
}
