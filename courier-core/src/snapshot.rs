//! Point-in-time adjacency view of the delivery graph.
//!
//! A [`GraphSnapshot`] is built fresh for every path computation and dropped
//! afterwards. Loading issues one `list_outgoing_steps` call per point, so
//! the cost grows linearly with the number of points; repositories backed by
//! a remote database will want a grouped query before graphs get large.

use std::collections::HashMap;

use log::debug;

use crate::{GraphRepository, Point, PointId, RepositoryError, Step};

/// A point paired with the steps leaving it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointSteps {
    /// The point.
    pub point: Point,
    /// Steps whose `start` is `point`, in repository order.
    pub steps: Vec<Step>,
}

/// Adjacency structure mapping each point to its outgoing steps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphSnapshot {
    entries: Vec<PointSteps>,
    index: HashMap<PointId, usize>,
}

impl GraphSnapshot {
    /// Load the current graph from `repository`.
    ///
    /// Repository errors are returned unchanged and no partial snapshot is
    /// produced.
    ///
    /// # Examples
    ///
    /// ```
    /// # #[cfg(feature = "store-sqlite")]
    /// # {
    /// use courier_core::{GraphSnapshot, PointId, SqliteGraphStore, seed_graph};
    ///
    /// let store = SqliteGraphStore::open_in_memory()?;
    /// seed_graph(&store)?;
    /// let snapshot = GraphSnapshot::load(&store)?;
    /// assert_eq!(snapshot.point_count(), 9);
    /// assert_eq!(snapshot.outgoing(PointId(1)).len(), 3);
    /// # }
    /// # Ok::<(), courier_core::RepositoryError>(())
    /// ```
    pub fn load<R>(repository: &R) -> Result<Self, RepositoryError>
    where
        R: GraphRepository + ?Sized,
    {
        let points = repository.list_points()?;
        let mut entries = Vec::with_capacity(points.len());
        for point in points {
            let steps = repository.list_outgoing_steps(point.id)?;
            entries.push(PointSteps { point, steps });
        }
        let snapshot = Self::from_entries(entries);
        debug!(
            "loaded graph snapshot with {} points and {} steps",
            snapshot.point_count(),
            snapshot.step_count()
        );
        Ok(snapshot)
    }

    /// Build a snapshot from points and steps already in memory.
    ///
    /// Steps are grouped by their start point, keeping their relative order.
    /// Steps leaving an unknown point are dropped.
    #[must_use]
    pub fn from_parts(points: Vec<Point>, steps: Vec<Step>) -> Self {
        let mut snapshot = Self::from_entries(
            points
                .into_iter()
                .map(|point| PointSteps {
                    point,
                    steps: Vec::new(),
                })
                .collect(),
        );
        for step in steps {
            let slot = snapshot
                .index
                .get(&step.start)
                .copied()
                .and_then(|position| snapshot.entries.get_mut(position));
            if let Some(entry) = slot {
                entry.steps.push(step);
            }
        }
        snapshot
    }

    fn from_entries(entries: Vec<PointSteps>) -> Self {
        let index = entries
            .iter()
            .enumerate()
            .map(|(position, entry)| (entry.point.id, position))
            .collect();
        Self { entries, index }
    }

    /// Steps leaving `point`; empty when the point is unknown.
    #[must_use]
    pub fn outgoing(&self, point: PointId) -> &[Step] {
        self.index
            .get(&point)
            .and_then(|&position| self.entries.get(position))
            .map(|entry| entry.steps.as_slice())
            .unwrap_or_default()
    }

    /// Whether `point` is part of the snapshot.
    #[must_use]
    pub fn contains(&self, point: PointId) -> bool {
        self.index.contains_key(&point)
    }

    /// All points with their outgoing steps, in repository order.
    #[must_use]
    pub fn entries(&self) -> &[PointSteps] {
        &self.entries
    }

    /// Number of points.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.entries.len()
    }

    /// Number of steps.
    #[must_use]
    pub fn step_count(&self) -> usize {
        self.entries.iter().map(|entry| entry.steps.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MemoryGraph;
    use crate::{Amount, StepId, seed_graph};
    use rstest::{fixture, rstest};

    #[fixture]
    fn seeded() -> MemoryGraph {
        let graph = MemoryGraph::default();
        seed_graph(&graph).expect("seed memory graph");
        graph
    }

    #[rstest]
    fn load_groups_steps_by_start(seeded: MemoryGraph) {
        let snapshot = GraphSnapshot::load(&seeded).expect("load snapshot");
        assert_eq!(snapshot.point_count(), 9);
        assert_eq!(snapshot.step_count(), 11);
        let ends: Vec<_> = snapshot
            .outgoing(PointId(6))
            .iter()
            .map(|step| step.end)
            .collect();
        assert_eq!(ends, vec![PointId(7), PointId(9)]);
    }

    #[rstest]
    fn load_issues_one_query_per_point(seeded: MemoryGraph) {
        GraphSnapshot::load(&seeded).expect("load snapshot");
        assert_eq!(seeded.point_listings(), 1);
        assert_eq!(seeded.outgoing_queries(), 9);
    }

    #[rstest]
    fn load_propagates_repository_failures(seeded: MemoryGraph) {
        seeded.fail_reads(true);
        let err = GraphSnapshot::load(&seeded).expect_err("reads are failing");
        assert!(matches!(err, RepositoryError::Backend { .. }));
    }

    #[rstest]
    fn unknown_points_have_no_steps() {
        let snapshot = GraphSnapshot::from_parts(vec![Point::new(1, "A")], Vec::new());
        assert!(snapshot.outgoing(PointId(42)).is_empty());
        assert!(!snapshot.contains(PointId(42)));
        assert!(snapshot.contains(PointId(1)));
    }

    #[rstest]
    fn from_parts_drops_steps_from_unknown_points() {
        let steps = vec![
            Step::new(StepId(1), 1, 2, Amount::ZERO, Amount::ZERO),
            Step::new(StepId(2), 7, 1, Amount::ZERO, Amount::ZERO),
        ];
        let snapshot =
            GraphSnapshot::from_parts(vec![Point::new(1, "A"), Point::new(2, "B")], steps);
        assert_eq!(snapshot.step_count(), 1);
    }
}
