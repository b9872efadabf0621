//! SQLite-backed graph store.

use std::fmt;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::{Connection, OptionalExtension, Row, params};

use crate::{
    Amount, GraphRepository, GraphStore, NewStep, Point, PointId, RepositoryError, RouteBase,
    RouteBaseId, Step, StepId,
};

const SCHEMA: &str = "
    PRAGMA foreign_keys = ON;
    CREATE TABLE IF NOT EXISTS points (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        description TEXT NOT NULL UNIQUE
    );
    CREATE TABLE IF NOT EXISTS steps (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        start_id INTEGER NOT NULL REFERENCES points(id) ON DELETE CASCADE,
        end_id INTEGER NOT NULL REFERENCES points(id) ON DELETE CASCADE,
        time_millis INTEGER NOT NULL,
        cost_millis INTEGER NOT NULL,
        UNIQUE (start_id, end_id)
    );
    CREATE TABLE IF NOT EXISTS route_bases (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        origin_id INTEGER NOT NULL REFERENCES points(id) ON DELETE CASCADE,
        destination_id INTEGER NOT NULL REFERENCES points(id) ON DELETE CASCADE,
        UNIQUE (origin_id, destination_id)
    );
    CREATE INDEX IF NOT EXISTS steps_by_start ON steps (start_id);
    CREATE INDEX IF NOT EXISTS steps_by_end ON steps (end_id);
";

const STEP_COLUMNS: &str = "id, start_id, end_id, time_millis, cost_millis";

/// Graph store persisted in a SQLite database.
///
/// The connection is guarded by a mutex so the store can be shared between
/// threads.
pub struct SqliteGraphStore {
    connection: Mutex<Connection>,
}

impl fmt::Debug for SqliteGraphStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteGraphStore").finish_non_exhaustive()
    }
}

impl SqliteGraphStore {
    /// Open (creating if needed) the database at `path` and ensure the
    /// schema exists.
    pub fn open<P>(path: P) -> Result<Self, RepositoryError>
    where
        P: AsRef<Path>,
    {
        Self::from_connection(Connection::open(path)?)
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self, RepositoryError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(connection: Connection) -> Result<Self, RepositoryError> {
        connection.execute_batch(SCHEMA)?;
        Ok(Self {
            connection: Mutex::new(connection),
        })
    }

    fn connection(&self) -> Result<MutexGuard<'_, Connection>, RepositoryError> {
        self.connection.lock().map_err(|_| RepositoryError::Poisoned)
    }

    fn query_steps(&self, filter: &str, point: PointId) -> Result<Vec<Step>, RepositoryError> {
        let connection = self.connection()?;
        let sql = format!("SELECT {STEP_COLUMNS} FROM steps WHERE {filter} = ?1 ORDER BY id");
        let mut statement = connection.prepare(&sql)?;
        let steps = statement
            .query_map(params![point.0], step_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(steps)
    }
}

fn step_from_row(row: &Row<'_>) -> rusqlite::Result<Step> {
    Ok(Step {
        id: StepId(row.get(0)?),
        start: PointId(row.get(1)?),
        end: PointId(row.get(2)?),
        time: Amount::from_millis(row.get(3)?),
        cost: Amount::from_millis(row.get(4)?),
    })
}

fn point_from_row(row: &Row<'_>) -> rusqlite::Result<Point> {
    Ok(Point {
        id: PointId(row.get(0)?),
        description: row.get(1)?,
    })
}

fn route_base_from_row(row: &Row<'_>) -> rusqlite::Result<RouteBase> {
    Ok(RouteBase {
        id: RouteBaseId(row.get(0)?),
        origin: PointId(row.get(1)?),
        destination: PointId(row.get(2)?),
    })
}

fn inserted_id(connection: &Connection) -> Result<u64, RepositoryError> {
    u64::try_from(connection.last_insert_rowid()).map_err(RepositoryError::backend)
}

impl GraphRepository for SqliteGraphStore {
    fn list_points(&self) -> Result<Vec<Point>, RepositoryError> {
        let connection = self.connection()?;
        let mut statement = connection.prepare("SELECT id, description FROM points ORDER BY id")?;
        let points = statement
            .query_map([], point_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(points)
    }

    fn list_outgoing_steps(&self, point: PointId) -> Result<Vec<Step>, RepositoryError> {
        self.query_steps("start_id", point)
    }

    fn list_incoming_steps(&self, point: PointId) -> Result<Vec<Step>, RepositoryError> {
        self.query_steps("end_id", point)
    }

    fn point(&self, id: PointId) -> Result<Option<Point>, RepositoryError> {
        let connection = self.connection()?;
        let point = connection
            .query_row(
                "SELECT id, description FROM points WHERE id = ?1",
                params![id.0],
                point_from_row,
            )
            .optional()?;
        Ok(point)
    }

    fn point_by_description(&self, description: &str) -> Result<Option<Point>, RepositoryError> {
        let connection = self.connection()?;
        let point = connection
            .query_row(
                "SELECT id, description FROM points WHERE description = ?1",
                params![description],
                point_from_row,
            )
            .optional()?;
        Ok(point)
    }

    fn step(&self, id: StepId) -> Result<Option<Step>, RepositoryError> {
        let connection = self.connection()?;
        let sql = format!("SELECT {STEP_COLUMNS} FROM steps WHERE id = ?1");
        let step = connection
            .query_row(&sql, params![id.0], step_from_row)
            .optional()?;
        Ok(step)
    }

    fn step_between(&self, start: PointId, end: PointId) -> Result<Option<Step>, RepositoryError> {
        let connection = self.connection()?;
        let sql = format!("SELECT {STEP_COLUMNS} FROM steps WHERE start_id = ?1 AND end_id = ?2");
        let step = connection
            .query_row(&sql, params![start.0, end.0], step_from_row)
            .optional()?;
        Ok(step)
    }

    fn route_base(&self, id: RouteBaseId) -> Result<Option<RouteBase>, RepositoryError> {
        let connection = self.connection()?;
        let route_base = connection
            .query_row(
                "SELECT id, origin_id, destination_id FROM route_bases WHERE id = ?1",
                params![id.0],
                route_base_from_row,
            )
            .optional()?;
        Ok(route_base)
    }

    fn route_base_between(
        &self,
        origin: PointId,
        destination: PointId,
    ) -> Result<Option<RouteBase>, RepositoryError> {
        let connection = self.connection()?;
        let route_base = connection
            .query_row(
                "SELECT id, origin_id, destination_id FROM route_bases \
                 WHERE origin_id = ?1 AND destination_id = ?2",
                params![origin.0, destination.0],
                route_base_from_row,
            )
            .optional()?;
        Ok(route_base)
    }
}

impl GraphStore for SqliteGraphStore {
    fn insert_point(&self, description: &str) -> Result<Point, RepositoryError> {
        let connection = self.connection()?;
        connection.execute(
            "INSERT INTO points (description) VALUES (?1)",
            params![description],
        )?;
        Ok(Point::new(inserted_id(&connection)?, description))
    }

    fn update_point(&self, point: &Point) -> Result<(), RepositoryError> {
        let connection = self.connection()?;
        connection.execute(
            "UPDATE points SET description = ?1 WHERE id = ?2",
            params![point.description, point.id.0],
        )?;
        Ok(())
    }

    fn delete_point(&self, id: PointId) -> Result<(), RepositoryError> {
        let connection = self.connection()?;
        connection.execute("DELETE FROM points WHERE id = ?1", params![id.0])?;
        Ok(())
    }

    fn insert_step(&self, step: NewStep) -> Result<Step, RepositoryError> {
        let connection = self.connection()?;
        connection.execute(
            "INSERT INTO steps (start_id, end_id, time_millis, cost_millis) \
             VALUES (?1, ?2, ?3, ?4)",
            params![
                step.start.0,
                step.end.0,
                step.time.millis(),
                step.cost.millis()
            ],
        )?;
        Ok(Step::new(
            inserted_id(&connection)?,
            step.start,
            step.end,
            step.time,
            step.cost,
        ))
    }

    fn update_step(&self, step: &Step) -> Result<(), RepositoryError> {
        let connection = self.connection()?;
        connection.execute(
            "UPDATE steps SET start_id = ?1, end_id = ?2, time_millis = ?3, cost_millis = ?4 \
             WHERE id = ?5",
            params![
                step.start.0,
                step.end.0,
                step.time.millis(),
                step.cost.millis(),
                step.id.0
            ],
        )?;
        Ok(())
    }

    fn delete_step(&self, id: StepId) -> Result<(), RepositoryError> {
        let connection = self.connection()?;
        connection.execute("DELETE FROM steps WHERE id = ?1", params![id.0])?;
        Ok(())
    }

    fn insert_route_base(
        &self,
        origin: PointId,
        destination: PointId,
    ) -> Result<RouteBase, RepositoryError> {
        let connection = self.connection()?;
        connection.execute(
            "INSERT INTO route_bases (origin_id, destination_id) VALUES (?1, ?2)",
            params![origin.0, destination.0],
        )?;
        Ok(RouteBase::new(
            inserted_id(&connection)?,
            origin,
            destination,
        ))
    }

    fn update_route_base(&self, route_base: &RouteBase) -> Result<(), RepositoryError> {
        let connection = self.connection()?;
        connection.execute(
            "UPDATE route_bases SET origin_id = ?1, destination_id = ?2 WHERE id = ?3",
            params![route_base.origin.0, route_base.destination.0, route_base.id.0],
        )?;
        Ok(())
    }

    fn delete_route_base(&self, id: RouteBaseId) -> Result<(), RepositoryError> {
        let connection = self.connection()?;
        connection.execute("DELETE FROM route_bases WHERE id = ?1", params![id.0])?;
        Ok(())
    }
}
