use std::fmt;

use gridtrail_core::Point;

/// Invalid arguments to a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    /// Start or target lies outside the grid.
    OutOfBounds(Point),
    /// The start cell is an obstacle.
    StartOnObstacle(Point),
    /// The target cell is an obstacle.
    TargetOnObstacle(Point),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds(p) => write!(f, "position {p} is outside the grid"),
            Self::StartOnObstacle(p) => write!(f, "start {p} is an obstacle"),
            Self::TargetOnObstacle(p) => write!(f, "target {p} is an obstacle"),
        }
    }
}

impl std::error::Error for SearchError {}
