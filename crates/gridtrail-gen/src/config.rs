//! Generation parameters.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::mapgen::{GenError, MazeGen};

/// Per-cell obstacle probability used when none is given.
pub const DEFAULT_OBSTACLE_PROBABILITY: f64 = 0.3;

/// Parameters for one generated maze.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MazeConfig {
    pub rows: i32,
    pub cols: i32,
    /// Chance in `[0, 1]` that any given cell becomes an obstacle.
    pub obstacle_probability: f64,
    /// Fixed seed for reproducible runs. `None` draws one from the thread RNG.
    pub seed: Option<u64>,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            rows: 30,
            cols: 30,
            obstacle_probability: DEFAULT_OBSTACLE_PROBABILITY,
            seed: None,
        }
    }
}

impl MazeConfig {
    /// Check dimensions and probability.
    pub fn validate(&self) -> Result<(), GenError> {
        validate(self.rows, self.cols, self.obstacle_probability)
    }

    /// Build the random source for this configuration.
    pub fn rng(&self) -> ChaCha8Rng {
        match self.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_rng(&mut rand::rng()),
        }
    }

    /// A generator driven by [`rng`](Self::rng).
    pub fn generator(&self) -> MazeGen<ChaCha8Rng> {
        MazeGen::new(self.rng())
    }
}

pub(crate) fn validate(rows: i32, cols: i32, obstacle_probability: f64) -> Result<(), GenError> {
    if rows <= 0 || cols <= 0 {
        return Err(GenError::InvalidDimensions { rows, cols });
    }
    // Also rejects NaN.
    if !(0.0..=1.0).contains(&obstacle_probability) {
        return Err(GenError::InvalidProbability(obstacle_probability));
    }
    Ok(())
}
