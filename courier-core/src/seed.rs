//! Reference delivery graph used by demos and acceptance tests.

use log::debug;

use crate::{Amount, GraphStore, NewStep, PointId, RepositoryError};

/// Descriptions of the reference points. A store that assigns identifiers
/// sequentially from one gives `A` id 1 through `I` id 9.
pub const SEED_POINTS: [&str; 9] = ["A", "B", "C", "D", "E", "F", "G", "H", "I"];

/// Reference steps as `(start, end, time, cost)` in whole units, by point id.
pub const SEED_STEPS: [(u64, u64, u64, u64); 11] = [
    (1, 3, 1, 20),
    (1, 5, 30, 5),
    (1, 8, 10, 1),
    (3, 2, 1, 12),
    (4, 6, 4, 50),
    (5, 4, 3, 5),
    (6, 7, 40, 50),
    (6, 9, 45, 50),
    (7, 2, 64, 73),
    (8, 5, 30, 1),
    (9, 2, 65, 5),
];

/// Reference route bases as `(origin, destination)` by point id.
pub const SEED_ROUTE_BASES: [(u64, u64); 1] = [(1, 2)];

/// Load the reference graph into an empty store.
///
/// Point identifiers in [`SEED_STEPS`] are mapped through the identifiers the
/// store actually assigns, so the graph shape is preserved even when the
/// store numbers points differently.
pub fn seed_graph<S>(store: &S) -> Result<(), RepositoryError>
where
    S: GraphStore + ?Sized,
{
    let mut ids = Vec::with_capacity(SEED_POINTS.len());
    for description in SEED_POINTS {
        ids.push(store.insert_point(description)?.id);
    }
    let resolve = |seed_id: u64| -> Result<PointId, RepositoryError> {
        usize::try_from(seed_id)
            .ok()
            .and_then(|position| position.checked_sub(1))
            .and_then(|index| ids.get(index).copied())
            .ok_or_else(|| RepositoryError::backend(format!("seed point {seed_id} is undefined")))
    };

    for (start, end, time, cost) in SEED_STEPS {
        store.insert_step(NewStep {
            start: resolve(start)?,
            end: resolve(end)?,
            time: Amount::from_units(time),
            cost: Amount::from_units(cost),
        })?;
    }
    for (origin, destination) in SEED_ROUTE_BASES {
        store.insert_route_base(resolve(origin)?, resolve(destination)?)?;
    }

    debug!(
        "seeded reference graph with {} points and {} steps",
        SEED_POINTS.len(),
        SEED_STEPS.len()
    );
    Ok(())
}
