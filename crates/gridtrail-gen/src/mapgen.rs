//! Random maze generation.
//!
//! Every cell is an independent Bernoulli trial: one uniform sample per cell,
//! in row-major order, and the cell becomes an obstacle when the sample is
//! below the obstacle probability. The target is then placed by rejection
//! sampling over the whole grid until an open cell comes up.
//!
//! Rejection sampling only terminates if an open cell exists, so generation
//! checks for one first and reports [`GenError::Unsatisfiable`] otherwise.

use std::fmt;

use gridtrail_core::{CellState, Grid, Point, Range};
use rand::Rng;

use crate::config::validate;

/// A generated maze: the grid and the position of its single target.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Maze {
    pub grid: Grid,
    pub target: Point,
}

/// Maze generator driven by an injected random source.
///
/// The same seed and parameters always produce the same maze.
pub struct MazeGen<R: Rng> {
    pub rng: R,
}

impl<R: Rng> MazeGen<R> {
    /// Create a new generator.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Generate a `rows × cols` maze.
    ///
    /// Parameters are validated before any sample is drawn.
    pub fn generate(
        &mut self,
        rows: i32,
        cols: i32,
        obstacle_probability: f64,
    ) -> Result<Maze, GenError> {
        validate(rows, cols, obstacle_probability)?;

        let mut grid = Grid::new(rows, cols);
        for p in grid.bounds().iter() {
            let r: f64 = self.rng.random();
            if r < obstacle_probability {
                grid.set(p, CellState::Obstacle);
            }
        }

        if grid.count(CellState::Open) == 0 {
            return Err(GenError::Unsatisfiable { rows, cols });
        }

        let target = loop {
            let p = self.random_cell(grid.bounds());
            if grid.at(p) == Some(CellState::Open) {
                break p;
            }
        };
        grid.set_target(target);

        log::debug!(
            "generated {rows}x{cols} maze: {} obstacles, target at {target}",
            grid.count(CellState::Obstacle)
        );
        Ok(Maze { grid, target })
    }

    /// Pick a random start cell: any cell that is not an obstacle.
    ///
    /// The target itself is an acceptable start. Cells are sampled uniformly
    /// until a passable one comes up.
    pub fn random_start(&mut self, grid: &Grid) -> Result<Point, GenError> {
        if grid.count(CellState::Obstacle) == grid.bounds().len() {
            return Err(GenError::Unsatisfiable {
                rows: grid.rows(),
                cols: grid.cols(),
            });
        }
        loop {
            let p = self.random_cell(grid.bounds());
            if grid.is_passable(p) {
                return Ok(p);
            }
        }
    }

    /// Uniform cell in `bounds`: row first, then column.
    fn random_cell(&mut self, bounds: Range) -> Point {
        let row = self.rng.random_range(bounds.min.y..bounds.max.y);
        let col = self.rng.random_range(bounds.min.x..bounds.max.x);
        Point::at(row, col)
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur when generating a maze.
#[derive(Debug, Clone, PartialEq)]
pub enum GenError {
    /// Rows or columns not strictly positive.
    InvalidDimensions { rows: i32, cols: i32 },
    /// Obstacle probability outside `[0, 1]`.
    InvalidProbability(f64),
    /// No open cell is left to place the target (or start) on.
    Unsatisfiable { rows: i32, cols: i32 },
}

impl fmt::Display for GenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions { rows, cols } => {
                write!(f, "invalid maze dimensions {rows}x{cols}: both must be positive")
            }
            Self::InvalidProbability(p) => {
                write!(f, "obstacle probability {p} is outside [0, 1]")
            }
            Self::Unsatisfiable { rows, cols } => {
                write!(f, "unsatisfiable maze: no open cell in {rows}x{cols} grid")
            }
        }
    }
}

impl std::error::Error for GenError {}
