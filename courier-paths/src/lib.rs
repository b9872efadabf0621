//! Path searches over a [`GraphSnapshot`](courier_core::GraphSnapshot).
//!
//! Two algorithms share one depth-first traversal:
//!
//! - [`all_paths`] enumerates every simple path between two points.
//! - [`best_path`] runs a branch-and-bound search for the single path with
//!   the smallest total cost or time.
//!
//! Both exclude a step leading directly from the origin to the destination,
//! so every reported path has at least one intermediate point. Traversal uses
//! an explicit stack; deep graphs do not grow the call stack. Enumeration is
//! exponential in the worst case.

#![forbid(unsafe_code)]

mod all_paths;
mod best_path;
mod traversal;

pub use all_paths::all_paths;
pub use best_path::best_path;
