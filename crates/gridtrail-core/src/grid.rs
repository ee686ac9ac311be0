//! Maze grids.
//!
//! A [`Grid`] stores two layers per cell:
//!
//! - the static topology, a [`CellState`] (`Open`, `Obstacle` or `Target`),
//!   fixed once the maze is generated;
//! - an explored flag written by searches for replay purposes.
//!
//! The two layers are combined into a [`Mark`] when a caller asks for the
//! annotated view ([`Grid::mark`], [`Grid::snapshot`]). An explored cell is
//! always an `Open` cell underneath, so exploration can never be mistaken
//! for an obstacle.

use std::fmt;

use crate::geom::{Point, Range};

/// Static state of a maze cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellState {
    #[default]
    Open,
    Obstacle,
    Target,
}

impl CellState {
    /// Text glyph used by [`Grid::parse`] and the `Display` impls.
    pub const fn glyph(self) -> char {
        match self {
            Self::Open => '.',
            Self::Obstacle => '#',
            Self::Target => 'T',
        }
    }

    fn from_glyph(ch: char) -> Option<Self> {
        match ch {
            '.' => Some(Self::Open),
            '#' => Some(Self::Obstacle),
            'T' => Some(Self::Target),
            _ => None,
        }
    }
}

/// Annotated view of a cell: its topology plus the exploration overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mark {
    Open,
    Obstacle,
    Target,
    Explored,
}

impl Mark {
    /// Text glyph for this mark.
    pub const fn glyph(self) -> char {
        match self {
            Self::Open => '.',
            Self::Obstacle => '#',
            Self::Target => 'T',
            Self::Explored => 'o',
        }
    }
}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// A `rows × cols` maze with an exploration overlay.
///
/// At most one cell is ever in state [`CellState::Target`]; a generated
/// maze has exactly one.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "GridRepr"))]
pub struct Grid {
    bounds: Range,
    cells: Vec<CellState>,
    explored: Vec<bool>,
    target: Option<Point>,
}

impl Grid {
    /// Create a `rows × cols` grid with every cell `Open`.
    ///
    /// Non-positive dimensions yield an empty grid.
    pub fn new(rows: i32, cols: i32) -> Self {
        let bounds = Range::with_dims(rows.max(0), cols.max(0));
        let len = bounds.len();
        Self {
            bounds,
            cells: vec![CellState::Open; len],
            explored: vec![false; len],
            target: None,
        }
    }

    /// Build a grid from a text layout, one line per row.
    ///
    /// `.` is open, `#` an obstacle and `T` the target. Lines must all have
    /// the same length and at most one `T` may appear. An empty layout is
    /// rejected.
    pub fn parse(text: &str) -> Result<Self, GridError> {
        let lines: Vec<&str> = text.lines().collect();
        let cols = lines.first().map_or(0, |l| l.chars().count());
        if cols == 0 {
            return Err(GridError::Empty);
        }
        if lines.iter().any(|l| l.chars().count() != cols) {
            return Err(GridError::InconsistentSize(text.to_string()));
        }

        let mut grid = Grid::new(lines.len() as i32, cols as i32);
        for (row, line) in lines.iter().enumerate() {
            for (col, ch) in line.chars().enumerate() {
                let pos = Point::at(row as i32, col as i32);
                let state = CellState::from_glyph(ch).ok_or(GridError::InvalidRune { ch, pos })?;
                if state == CellState::Target {
                    if let Some(first) = grid.target {
                        return Err(GridError::MultipleTargets { first, second: pos });
                    }
                }
                grid.set(pos, state);
            }
        }
        Ok(grid)
    }

    /// Returns the bounding range of this grid.
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// Number of rows.
    pub fn rows(&self) -> i32 {
        self.bounds.height()
    }

    /// Number of columns.
    pub fn cols(&self) -> i32 {
        self.bounds.width()
    }

    /// Whether the grid contains the given point.
    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    /// The static state at a point, or `None` if out of bounds.
    pub fn at(&self, p: Point) -> Option<CellState> {
        self.bounds.index(p).map(|i| self.cells[i])
    }

    /// Set the static state at a point. Does nothing if out of bounds.
    ///
    /// Setting [`CellState::Target`] goes through [`set_target`](Self::set_target);
    /// overwriting the current target clears it.
    pub fn set(&mut self, p: Point, state: CellState) {
        if state == CellState::Target {
            self.set_target(p);
            return;
        }
        let Some(i) = self.bounds.index(p) else {
            return;
        };
        if self.target == Some(p) {
            self.target = None;
        }
        self.cells[i] = state;
    }

    /// The target position, if one has been placed.
    pub fn target(&self) -> Option<Point> {
        self.target
    }

    /// Make `p` the target. A previous target reverts to `Open`.
    ///
    /// Returns `false` (and changes nothing) if `p` is out of bounds.
    pub fn set_target(&mut self, p: Point) -> bool {
        let Some(i) = self.bounds.index(p) else {
            return false;
        };
        if let Some(old) = self.target.take() {
            if let Some(oi) = self.bounds.index(old) {
                self.cells[oi] = CellState::Open;
            }
        }
        self.cells[i] = CellState::Target;
        self.target = Some(p);
        true
    }

    /// Whether `p` is in bounds and not an obstacle.
    pub fn is_passable(&self, p: Point) -> bool {
        matches!(self.at(p), Some(s) if s != CellState::Obstacle)
    }

    /// Count how many cells have the given static state.
    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|&&c| c == state).count()
    }

    /// Iterate over `(Point, CellState)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Point, CellState)> + '_ {
        self.bounds.iter().zip(self.cells.iter().copied())
    }

    // -----------------------------------------------------------------------
    // Exploration overlay
    // -----------------------------------------------------------------------

    /// Whether a search has marked `p` as explored.
    pub fn is_explored(&self, p: Point) -> bool {
        self.bounds.index(p).is_some_and(|i| self.explored[i])
    }

    /// Mark `p` as explored. Returns `true` if the flag was newly set.
    ///
    /// Only the overlay changes; the static state is untouched.
    pub fn mark_explored(&mut self, p: Point) -> bool {
        match self.bounds.index(p) {
            Some(i) if !self.explored[i] => {
                self.explored[i] = true;
                true
            }
            _ => false,
        }
    }

    /// Number of explored cells.
    pub fn explored_count(&self) -> usize {
        self.explored.iter().filter(|&&e| e).count()
    }

    /// Drop the exploration overlay, restoring the pristine map.
    pub fn clear_explored(&mut self) {
        self.explored.fill(false);
    }

    /// The annotated view of a cell, or `None` if out of bounds.
    pub fn mark(&self, p: Point) -> Option<Mark> {
        let i = self.bounds.index(p)?;
        Some(self.mark_at(i))
    }

    fn mark_at(&self, i: usize) -> Mark {
        match self.cells[i] {
            CellState::Obstacle => Mark::Obstacle,
            CellState::Target => Mark::Target,
            CellState::Open if self.explored[i] => Mark::Explored,
            CellState::Open => Mark::Open,
        }
    }

    /// Copy the current annotated view of every cell.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            bounds: self.bounds,
            marks: (0..self.cells.len()).map(|i| self.mark_at(i)).collect(),
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_rows(f, self.bounds, |i| self.mark_at(i).glyph())
    }
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// The annotated state of a whole grid at one instant.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "SnapshotRepr"))]
pub struct Snapshot {
    bounds: Range,
    marks: Vec<Mark>,
}

impl Snapshot {
    /// The range covered by the snapshot.
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// Mark at a point, or `None` if out of bounds.
    pub fn at(&self, p: Point) -> Option<Mark> {
        self.bounds.index(p).map(|i| self.marks[i])
    }

    /// Count cells with the given mark.
    pub fn count(&self, mark: Mark) -> usize {
        self.marks.iter().filter(|&&m| m == mark).count()
    }

    /// Iterate over `(Point, Mark)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Point, Mark)> + '_ {
        self.bounds.iter().zip(self.marks.iter().copied())
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_rows(f, self.bounds, |i| self.marks[i].glyph())
    }
}

fn write_rows(f: &mut fmt::Formatter<'_>, bounds: Range, glyph: impl Fn(usize) -> char) -> fmt::Result {
    let w = bounds.width().max(0) as usize;
    for row in 0..bounds.height().max(0) as usize {
        if row > 0 {
            writeln!(f)?;
        }
        for col in 0..w {
            write!(f, "{}", glyph(row * w + col))?;
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur when parsing a grid layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Lines have inconsistent widths.
    InconsistentSize(String),
    /// A character other than `.`, `#` or `T` was found.
    InvalidRune { ch: char, pos: Point },
    /// More than one `T` in the layout.
    MultipleTargets { first: Point, second: Point },
    /// A layout with no rows or no columns.
    Empty,
    /// Serialized data whose layers disagree with each other.
    Malformed(&'static str),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InconsistentSize(s) => write!(f, "grid: inconsistent size:\n{s}"),
            Self::InvalidRune { ch, pos } => {
                write!(f, "grid contains invalid rune \u{201c}{ch}\u{201d} at {pos}")
            }
            Self::MultipleTargets { first, second } => {
                write!(f, "grid has more than one target: {first} and {second}")
            }
            Self::Empty => write!(f, "grid layout is empty"),
            Self::Malformed(why) => write!(f, "malformed grid data: {why}"),
        }
    }
}

impl std::error::Error for GridError {}

// ---------------------------------------------------------------------------
// Checked deserialization
// ---------------------------------------------------------------------------

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct GridRepr {
    bounds: Range,
    cells: Vec<CellState>,
    explored: Vec<bool>,
    target: Option<Point>,
}

#[cfg(feature = "serde")]
impl TryFrom<GridRepr> for Grid {
    type Error = GridError;

    fn try_from(r: GridRepr) -> Result<Self, GridError> {
        let len = r.bounds.len();
        if r.cells.len() != len || r.explored.len() != len {
            return Err(GridError::Malformed("layer sizes do not match bounds"));
        }
        let mut targets = r
            .bounds
            .iter()
            .zip(&r.cells)
            .filter(|&(_, &c)| c == CellState::Target)
            .map(|(p, _)| p);
        let found = targets.next();
        if targets.next().is_some() {
            return Err(GridError::Malformed("more than one target cell"));
        }
        if found != r.target {
            return Err(GridError::Malformed("target does not match cells"));
        }
        Ok(Grid {
            bounds: r.bounds,
            cells: r.cells,
            explored: r.explored,
            target: r.target,
        })
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct SnapshotRepr {
    bounds: Range,
    marks: Vec<Mark>,
}

#[cfg(feature = "serde")]
impl TryFrom<SnapshotRepr> for Snapshot {
    type Error = GridError;

    fn try_from(r: SnapshotRepr) -> Result<Self, GridError> {
        if r.marks.len() != r.bounds.len() {
            return Err(GridError::Malformed("mark count does not match bounds"));
        }
        Ok(Snapshot {
            bounds: r.bounds,
            marks: r.marks,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOM: &str = "\
..#.
.#T.
....";

    #[test]
    fn new_is_all_open() {
        let g = Grid::new(3, 5);
        assert_eq!(g.rows(), 3);
        assert_eq!(g.cols(), 5);
        assert_eq!(g.count(CellState::Open), 15);
        assert_eq!(g.target(), None);
    }

    #[test]
    fn parse_layout() {
        let g = Grid::parse(ROOM).unwrap();
        assert_eq!(g.rows(), 3);
        assert_eq!(g.cols(), 4);
        assert_eq!(g.at(Point::at(0, 2)), Some(CellState::Obstacle));
        assert_eq!(g.at(Point::at(1, 2)), Some(CellState::Target));
        assert_eq!(g.target(), Some(Point::at(1, 2)));
        assert_eq!(g.count(CellState::Obstacle), 2);
        assert_eq!(g.to_string(), ROOM);
    }

    #[test]
    fn parse_errors() {
        assert!(matches!(
            Grid::parse("..\n..."),
            Err(GridError::InconsistentSize(_))
        ));
        assert_eq!(
            Grid::parse("..\n.x"),
            Err(GridError::InvalidRune {
                ch: 'x',
                pos: Point::at(1, 1)
            })
        );
        assert_eq!(Grid::parse(""), Err(GridError::Empty));
        assert_eq!(Grid::parse("\n\n"), Err(GridError::Empty));
        assert_eq!(
            Grid::parse("T.\n.T"),
            Err(GridError::MultipleTargets {
                first: Point::at(0, 0),
                second: Point::at(1, 1)
            })
        );
    }

    #[test]
    fn out_of_bounds_is_none() {
        let mut g = Grid::new(2, 2);
        assert_eq!(g.at(Point::at(2, 0)), None);
        assert_eq!(g.mark(Point::at(0, -1)), None);
        g.set(Point::at(5, 5), CellState::Obstacle);
        assert_eq!(g.count(CellState::Obstacle), 0);
        assert!(!g.set_target(Point::at(-1, 0)));
        assert!(!g.is_passable(Point::at(2, 2)));
    }

    #[test]
    fn single_target_is_kept() {
        let mut g = Grid::new(3, 3);
        assert!(g.set_target(Point::at(0, 0)));
        g.set(Point::at(2, 2), CellState::Target);
        assert_eq!(g.target(), Some(Point::at(2, 2)));
        assert_eq!(g.count(CellState::Target), 1);
        assert_eq!(g.at(Point::at(0, 0)), Some(CellState::Open));

        g.set(Point::at(2, 2), CellState::Obstacle);
        assert_eq!(g.target(), None);
        assert_eq!(g.count(CellState::Target), 0);
    }

    #[test]
    fn explored_overlay_leaves_topology_alone() {
        let mut g = Grid::parse(ROOM).unwrap();
        let pristine = g.clone();
        let p = Point::at(0, 0);

        assert!(g.mark_explored(p));
        assert!(!g.mark_explored(p));
        assert!(g.is_explored(p));
        assert_eq!(g.mark(p), Some(Mark::Explored));
        assert_eq!(g.at(p), Some(CellState::Open));
        assert_eq!(g.count(CellState::Obstacle), 2);
        assert_eq!(g.explored_count(), 1);

        g.clear_explored();
        assert_eq!(g, pristine);
    }

    #[test]
    fn explored_never_hides_obstacle_or_target() {
        let mut g = Grid::parse(ROOM).unwrap();
        g.mark_explored(Point::at(0, 2));
        g.mark_explored(Point::at(1, 2));
        assert_eq!(g.mark(Point::at(0, 2)), Some(Mark::Obstacle));
        assert_eq!(g.mark(Point::at(1, 2)), Some(Mark::Target));
    }

    #[test]
    fn snapshot_is_detached() {
        let mut g = Grid::parse(ROOM).unwrap();
        g.mark_explored(Point::at(2, 0));
        let snap = g.snapshot();
        g.mark_explored(Point::at(2, 1));

        assert_eq!(snap.at(Point::at(2, 0)), Some(Mark::Explored));
        assert_eq!(snap.at(Point::at(2, 1)), Some(Mark::Open));
        assert_eq!(snap.count(Mark::Explored), 1);
        assert_eq!(snap.to_string(), "..#.\n.#T.\no...");
        assert_eq!(snap.iter().count(), 12);
    }
}
