//! Maze generation for gridtrail: Bernoulli obstacle fields with a single
//! randomly placed target, plus random start selection.

pub mod config;
pub mod mapgen;

pub use config::{DEFAULT_OBSTACLE_PROBABILITY, MazeConfig};
pub use mapgen::{GenError, Maze, MazeGen};
