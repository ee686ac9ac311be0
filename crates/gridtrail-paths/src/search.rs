use std::collections::VecDeque;

use gridtrail_core::{Point, Range};

/// Sentinel parent index for the root frontier entry.
pub(crate) const NO_PARENT: usize = usize::MAX;

/// A frontier entry: a position and the entry it was reached from.
///
/// Following `parent` links back to the root yields the path-so-far of
/// this entry, so the frontier never copies whole paths.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Entry {
    pub(crate) pos: Point,
    pub(crate) parent: usize,
}

// ---------------------------------------------------------------------------
// SearchRange
// ---------------------------------------------------------------------------

/// Reusable search context for a grid rectangle.
///
/// `SearchRange` owns the visited flags, the frontier and the entry arena,
/// so repeated searches on same-sized grids incur no reallocation of those
/// buffers.
pub struct SearchRange {
    pub(crate) rng: Range,
    pub(crate) visited: Vec<bool>,
    pub(crate) entries: Vec<Entry>,
    pub(crate) frontier: VecDeque<usize>,
    pub(crate) stack: Vec<usize>,
    // shared scratch buffer for neighbor queries
    pub(crate) nbuf: Vec<Point>,
}

impl SearchRange {
    /// Create a new `SearchRange` for the given grid rectangle.
    pub fn new(rng: Range) -> Self {
        Self {
            rng,
            visited: vec![false; rng.len()],
            entries: Vec::new(),
            frontier: VecDeque::new(),
            stack: Vec::new(),
            nbuf: Vec::with_capacity(4),
        }
    }

    /// Replace the underlying range.
    ///
    /// The visited buffer keeps its allocation when the new range fits.
    pub fn set_range(&mut self, rng: Range) {
        self.rng = rng;
        self.visited.clear();
        self.visited.resize(rng.len(), false);
        self.entries.clear();
        self.frontier.clear();
        self.stack.clear();
    }

    /// The grid rectangle being used.
    #[inline]
    pub fn range(&self) -> Range {
        self.rng
    }

    /// Clear visited flags and queues before a new search.
    pub(crate) fn reset(&mut self) {
        self.visited.fill(false);
        self.entries.clear();
        self.frontier.clear();
        self.stack.clear();
    }

    /// Convert a `Point` to a flat index. Returns `None` if out of range.
    #[inline]
    pub(crate) fn idx(&self, p: Point) -> Option<usize> {
        self.rng.index(p)
    }

    /// Positions from the root entry to entry `ei`, inclusive.
    pub(crate) fn path_to(&self, ei: usize) -> Vec<Point> {
        let mut path = Vec::new();
        let mut cur = ei;
        while cur != NO_PARENT {
            let e = self.entries[cur];
            path.push(e.pos);
            cur = e.parent;
        }
        path.reverse();
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_range_resizes_visited() {
        let mut sr = SearchRange::new(Range::with_dims(20, 20));
        assert_eq!(sr.visited.len(), 400);

        let small = Range::with_dims(5, 5);
        sr.set_range(small);
        assert_eq!(sr.range(), small);
        assert_eq!(sr.visited.len(), 25);
        assert!(sr.visited.capacity() >= 400);
    }

    #[test]
    fn path_to_follows_parents() {
        let mut sr = SearchRange::new(Range::with_dims(3, 3));
        sr.entries.push(Entry {
            pos: Point::at(0, 0),
            parent: NO_PARENT,
        });
        sr.entries.push(Entry {
            pos: Point::at(1, 0),
            parent: 0,
        });
        sr.entries.push(Entry {
            pos: Point::at(0, 1),
            parent: 0,
        });
        sr.entries.push(Entry {
            pos: Point::at(1, 1),
            parent: 1,
        });
        assert_eq!(
            sr.path_to(3),
            vec![Point::at(0, 0), Point::at(1, 0), Point::at(1, 1)]
        );
        assert_eq!(sr.path_to(0), vec![Point::at(0, 0)]);
    }
}
