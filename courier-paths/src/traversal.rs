//! Depth-first walk shared by the path searches.

use std::collections::HashSet;
use std::vec;

use courier_core::{Amount, GraphSnapshot, Metric, PointId, Step, StepsCollection};

/// Running cost and time of a partial path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Totals {
    pub(crate) cost: Amount,
    pub(crate) time: Amount,
}

impl Totals {
    const fn after(self, step: &Step) -> Self {
        Self {
            cost: self.cost.saturating_add(step.cost),
            time: self.time.saturating_add(step.time),
        }
    }

    pub(crate) const fn get(self, metric: Metric) -> Amount {
        match metric {
            Metric::Cost => self.cost,
            Metric::Time => self.time,
        }
    }
}

/// Hooks a search plugs into [`walk`].
pub(crate) trait Visit<'a> {
    /// Arrange the candidate steps leaving a point. Repository order is kept
    /// by default.
    fn order(&self, steps: Vec<&'a Step>) -> Vec<&'a Step> {
        steps
    }

    /// Whether the walk may take a step that brings the path to `reached`.
    fn admit(&self, _reached: Totals) -> bool {
        true
    }

    /// A step completed a path to the destination.
    fn arrive(&mut self, path: &[&'a Step], last: &'a Step, reached: Totals);
}

struct Frame<'a> {
    candidates: vec::IntoIter<&'a Step>,
    reached: Totals,
}

/// Visit every simple path from `origin` to `destination`, skipping a first
/// step that lands directly on `destination`.
///
/// Each frame on the stack holds the untried steps of one point on the
/// current path; popping a frame backtracks the step that entered it.
pub(crate) fn walk<'a, V>(
    snapshot: &'a GraphSnapshot,
    origin: PointId,
    destination: PointId,
    visitor: &mut V,
) where
    V: Visit<'a>,
{
    let first = snapshot
        .outgoing(origin)
        .iter()
        .filter(|step| step.end != destination)
        .collect();
    let mut frames = vec![Frame {
        candidates: visitor.order(first).into_iter(),
        reached: Totals::default(),
    }];
    let mut path: Vec<&'a Step> = Vec::new();
    let mut visited = HashSet::from([origin]);

    while let Some(frame) = frames.last_mut() {
        let Some(step) = frame.candidates.next() else {
            frames.pop();
            if let Some(left) = path.pop() {
                visited.remove(&left.end);
            }
            continue;
        };
        if visited.contains(&step.end) {
            continue;
        }
        let reached = frame.reached.after(step);
        if !visitor.admit(reached) {
            continue;
        }
        if step.end == destination {
            visitor.arrive(&path, step, reached);
            continue;
        }
        path.push(step);
        visited.insert(step.end);
        let next = visitor.order(snapshot.outgoing(step.end).iter().collect());
        frames.push(Frame {
            candidates: next.into_iter(),
            reached,
        });
    }
}

/// Copy a borrowed path into an owned collection.
pub(crate) fn collect(path: &[&Step], last: &Step) -> StepsCollection {
    StepsCollection::from_steps(
        path.iter()
            .copied()
            .chain(std::iter::once(last))
            .cloned()
            .collect(),
    )
}
