//! Breadth-first maze search for gridtrail.
//!
//! The search finds a shortest 4-connected path from a start cell to the
//! target and records one [`ExplorationEvent`] per processed cell, so a
//! renderer can replay the exploration frame by frame.
//!
//! - [`find_path`] runs a single search.
//! - [`SearchRange`] owns the search buffers and can be reused across
//!   searches on grids of the same size; it also provides
//!   [`reachable`](SearchRange::reachable) flood fills.
//!
//! Searching writes the explored overlay of the [`Grid`](gridtrail_core::Grid)
//! it is given. The obstacle layout is never touched, but the grid is not a
//! pristine map afterwards until
//! [`clear_explored`](gridtrail_core::Grid::clear_explored) is called.

mod bfs;
mod distance;
mod error;
mod reachable;
mod search;
mod trace;
mod traits;

pub use bfs::find_path;
pub use distance::manhattan;
pub use error::SearchError;
pub use search::SearchRange;
pub use trace::{ExplorationEvent, Path, Search, Trace};
pub use traits::Pather;
