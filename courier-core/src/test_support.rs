//! Test-only, in-memory `GraphStore` implementation used by unit and
//! behaviour tests.

use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::{
    Amount, GraphRepository, GraphStore, NewStep, Point, PointId, RepositoryError, RouteBase,
    RouteBaseId, Step, StepId,
};

#[derive(Debug, Default)]
struct Tables {
    points: Vec<Point>,
    steps: Vec<Step>,
    route_bases: Vec<RouteBase>,
    last_point: u64,
    last_step: u64,
    last_route_base: u64,
}

/// In-memory graph store that counts reads and can be told to fail.
///
/// Each entity kind draws identifiers from its own sequence starting at one,
/// like an auto-increment column.
#[derive(Debug, Default)]
pub struct MemoryGraph {
    tables: RwLock<Tables>,
    point_listings: AtomicUsize,
    outgoing_queries: AtomicUsize,
    failing: AtomicBool,
}

impl MemoryGraph {
    /// Create a graph from explicit points and steps.
    #[must_use]
    pub fn with_graph<P, S>(points: P, steps: S) -> Self
    where
        P: IntoIterator<Item = Point>,
        S: IntoIterator<Item = Step>,
    {
        let points: Vec<Point> = points.into_iter().collect();
        let steps: Vec<Step> = steps.into_iter().collect();
        let tables = Tables {
            last_point: points.iter().map(|p| p.id.0).max().unwrap_or(0),
            last_step: steps.iter().map(|s| s.id.0).max().unwrap_or(0),
            points,
            steps,
            ..Tables::default()
        };
        Self {
            tables: RwLock::new(tables),
            ..Self::default()
        }
    }

    /// Make every subsequent read fail (or succeed again).
    pub fn fail_reads(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of `list_points` calls served so far.
    #[must_use]
    pub fn point_listings(&self) -> usize {
        self.point_listings.load(Ordering::SeqCst)
    }

    /// Number of `list_outgoing_steps` calls served so far.
    #[must_use]
    pub fn outgoing_queries(&self) -> usize {
        self.outgoing_queries.load(Ordering::SeqCst)
    }

    fn check_reads(&self) -> Result<(), RepositoryError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(RepositoryError::backend("memory graph reads are disabled"))
        } else {
            Ok(())
        }
    }

    fn read<T>(&self, query: impl FnOnce(&Tables) -> T) -> Result<T, RepositoryError> {
        self.check_reads()?;
        let tables = self.tables.read().map_err(|_| RepositoryError::Poisoned)?;
        Ok(query(&tables))
    }

    fn write<T>(&self, change: impl FnOnce(&mut Tables) -> T) -> Result<T, RepositoryError> {
        let mut tables = self.tables.write().map_err(|_| RepositoryError::Poisoned)?;
        Ok(change(&mut tables))
    }
}

impl GraphRepository for MemoryGraph {
    fn list_points(&self) -> Result<Vec<Point>, RepositoryError> {
        self.point_listings.fetch_add(1, Ordering::SeqCst);
        self.read(|t| t.points.clone())
    }

    fn list_outgoing_steps(&self, point: PointId) -> Result<Vec<Step>, RepositoryError> {
        self.outgoing_queries.fetch_add(1, Ordering::SeqCst);
        self.read(|t| {
            t.steps.iter().filter(|s| s.start == point).cloned().collect()
        })
    }

    fn list_incoming_steps(&self, point: PointId) -> Result<Vec<Step>, RepositoryError> {
        self.read(|t| {
            t.steps.iter().filter(|s| s.end == point).cloned().collect()
        })
    }

    fn point(&self, id: PointId) -> Result<Option<Point>, RepositoryError> {
        self.read(|t| t.points.iter().find(|p| p.id == id).cloned())
    }

    fn point_by_description(&self, description: &str) -> Result<Option<Point>, RepositoryError> {
        self.read(|t| {
            t.points
                .iter()
                .find(|p| p.description == description)
                .cloned()
        })
    }

    fn step(&self, id: StepId) -> Result<Option<Step>, RepositoryError> {
        self.read(|t| t.steps.iter().find(|s| s.id == id).cloned())
    }

    fn step_between(&self, start: PointId, end: PointId) -> Result<Option<Step>, RepositoryError> {
        self.read(|t| {
            t.steps
                .iter()
                .find(|s| s.start == start && s.end == end)
                .cloned()
        })
    }

    fn route_base(&self, id: RouteBaseId) -> Result<Option<RouteBase>, RepositoryError> {
        self.read(|t| {
            t.route_bases.iter().find(|r| r.id == id).copied()
        })
    }

    fn route_base_between(
        &self,
        origin: PointId,
        destination: PointId,
    ) -> Result<Option<RouteBase>, RepositoryError> {
        self.read(|t| {
            t.route_bases
                .iter()
                .find(|r| r.origin == origin && r.destination == destination)
                .copied()
        })
    }
}

impl GraphStore for MemoryGraph {
    fn insert_point(&self, description: &str) -> Result<Point, RepositoryError> {
        self.write(|t| {
            t.last_point += 1;
            let point = Point::new(t.last_point, description);
            t.points.push(point.clone());
            point
        })
    }

    fn update_point(&self, point: &Point) -> Result<(), RepositoryError> {
        self.write(|t| {
            if let Some(stored) = t.points.iter_mut().find(|p| p.id == point.id) {
                stored.clone_from(point);
            }
        })
    }

    fn delete_point(&self, id: PointId) -> Result<(), RepositoryError> {
        self.write(|t| {
            t.points.retain(|p| p.id != id);
            t.steps.retain(|s| s.start != id && s.end != id);
            t.route_bases
                .retain(|r| r.origin != id && r.destination != id);
        })
    }

    fn insert_step(&self, step: NewStep) -> Result<Step, RepositoryError> {
        self.write(|t| {
            t.last_step += 1;
            let stored = Step::new(t.last_step, step.start, step.end, step.time, step.cost);
            t.steps.push(stored.clone());
            stored
        })
    }

    fn update_step(&self, step: &Step) -> Result<(), RepositoryError> {
        self.write(|t| {
            if let Some(stored) = t.steps.iter_mut().find(|s| s.id == step.id) {
                stored.clone_from(step);
            }
        })
    }

    fn delete_step(&self, id: StepId) -> Result<(), RepositoryError> {
        self.write(|t| t.steps.retain(|s| s.id != id))
    }

    fn insert_route_base(
        &self,
        origin: PointId,
        destination: PointId,
    ) -> Result<RouteBase, RepositoryError> {
        self.write(|t| {
            t.last_route_base += 1;
            let stored = RouteBase::new(t.last_route_base, origin, destination);
            t.route_bases.push(stored);
            stored
        })
    }

    fn update_route_base(&self, route_base: &RouteBase) -> Result<(), RepositoryError> {
        self.write(|t| {
            if let Some(stored) = t.route_bases.iter_mut().find(|r| r.id == route_base.id) {
                *stored = *route_base;
            }
        })
    }

    fn delete_route_base(&self, id: RouteBaseId) -> Result<(), RepositoryError> {
        self.write(|t| t.route_bases.retain(|r| r.id != id))
    }
}

/// Shorthand for a step with whole-unit time and cost.
#[must_use]
pub fn step(id: u64, start: u64, end: u64, time: u64, cost: u64) -> Step {
    Step::new(
        id,
        start,
        end,
        Amount::from_units(time),
        Amount::from_units(cost),
    )
}

/// Points named `P1`, `P2`, ... for ids `1..=count`.
#[must_use]
pub fn numbered_points(count: u64) -> Vec<Point> {
    (1..=count).map(|id| Point::new(id, format!("P{id}"))).collect()
}
