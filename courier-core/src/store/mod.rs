//! Persistent implementations of the graph repository traits.
//!
//! The SQLite store keeps points, steps and route bases in three tables and
//! stores step weights as integer thousandths so [`Amount`](crate::Amount)
//! values round-trip exactly.

#[cfg(feature = "store-sqlite")]
mod sqlite;

#[cfg(feature = "store-sqlite")]
pub use sqlite::SqliteGraphStore;
