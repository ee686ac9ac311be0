//! **gridtrail-core** — core types for grid maze search.
//!
//! This crate provides the foundational types used across the *gridtrail*
//! crates: geometry primitives, the cell topology of a maze, and a grid
//! that keeps its static layout apart from the exploration overlay written
//! by searches.

pub mod geom;
pub mod grid;

pub use geom::{Point, Range};
pub use grid::{CellState, Grid, GridError, Mark, Snapshot};
