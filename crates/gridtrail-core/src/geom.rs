//! Geometry primitives: [`Point`] and [`Range`].
//!
//! Points use screen coordinates: `x` is the column and grows right, `y` is
//! the row and grows down. The maze code mostly talks in `(row, col)` pairs,
//! so [`Point::at`], [`Point::row`] and [`Point::col`] provide that view.

use std::fmt;
use std::ops::Add;

// ---------------------------------------------------------------------------
// Point
// ---------------------------------------------------------------------------

/// A 2D integer point. X is the column, Y is the row.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// One row up.
    pub const UP: Self = Self { x: 0, y: -1 };
    /// One row down.
    pub const DOWN: Self = Self { x: 0, y: 1 };
    /// One column left.
    pub const LEFT: Self = Self { x: -1, y: 0 };
    /// One column right.
    pub const RIGHT: Self = Self { x: 1, y: 0 };

    /// Cardinal directions in expansion order: up, down, left, right.
    pub const CARDINALS: [Self; 4] = [Self::UP, Self::DOWN, Self::LEFT, Self::RIGHT];

    /// Create a new point.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Create a point from a `(row, col)` pair.
    #[inline]
    pub const fn at(row: i32, col: i32) -> Self {
        Self { x: col, y: row }
    }

    /// Row index (same as `y`).
    #[inline]
    pub const fn row(self) -> i32 {
        self.y
    }

    /// Column index (same as `x`).
    #[inline]
    pub const fn col(self) -> i32 {
        self.x
    }

    /// The four cardinal neighbours, in [`Point::CARDINALS`] order.
    #[inline]
    pub fn neighbors_4(self) -> [Point; 4] {
        Self::CARDINALS.map(|d| self + d)
    }

    /// Whether `other` is exactly one cardinal step away.
    #[inline]
    pub fn is_adjacent(self, other: Point) -> bool {
        (self.x - other.x).abs() + (self.y - other.y).abs() == 1
    }
}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Point {
    /// Row-major ordering.
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.y.cmp(&other.y).then(self.x.cmp(&other.x))
    }
}

impl fmt::Display for Point {
    /// Formats as `(row, col)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.y, self.x)
    }
}

impl Add for Point {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

// ---------------------------------------------------------------------------
// Range
// ---------------------------------------------------------------------------

/// A half-open rectangle \[min, max). `min` is inclusive, `max` is exclusive.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Range {
    pub min: Point,
    pub max: Point,
}

impl Range {
    /// Create a new range from two corners and auto-canonicalize so that
    /// `min` ≤ `max` on each axis.
    #[inline]
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self {
            min: Point::new(x0.min(x1), y0.min(y1)),
            max: Point::new(x0.max(x1), y0.max(y1)),
        }
    }

    /// The range `[0, cols) × [0, rows)` covering a `rows × cols` grid.
    #[inline]
    pub fn with_dims(rows: i32, cols: i32) -> Self {
        Self::new(0, 0, cols, rows)
    }

    /// Width of the range (number of columns).
    #[inline]
    pub fn width(self) -> i32 {
        self.max.x - self.min.x
    }

    /// Height of the range (number of rows).
    #[inline]
    pub fn height(self) -> i32 {
        self.max.y - self.min.y
    }

    /// Number of points in the range.
    #[inline]
    pub fn len(self) -> usize {
        if self.is_empty() {
            return 0;
        }
        (self.width() as usize) * (self.height() as usize)
    }

    /// Whether the range contains no points.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.min.x >= self.max.x || self.min.y >= self.max.y
    }

    /// Whether `p` lies inside the range.
    #[inline]
    pub fn contains(self, p: Point) -> bool {
        p.x >= self.min.x && p.x < self.max.x && p.y >= self.min.y && p.y < self.max.y
    }

    /// Row-major index of `p`, or `None` if it lies outside.
    #[inline]
    pub fn index(self, p: Point) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        let x = (p.x - self.min.x) as usize;
        let y = (p.y - self.min.y) as usize;
        Some(y * self.width() as usize + x)
    }

    /// Inverse of [`index`](Self::index).
    #[inline]
    pub fn point(self, idx: usize) -> Point {
        let w = self.width().max(1) as usize;
        Point::new(
            (idx % w) as i32 + self.min.x,
            (idx / w) as i32 + self.min.y,
        )
    }

    /// Iterate over the points of the range in row-major order.
    #[inline]
    pub fn iter(self) -> RangeIter {
        RangeIter {
            range: self,
            cur: self.min,
        }
    }
}

impl IntoIterator for Range {
    type Item = Point;
    type IntoIter = RangeIter;
    #[inline]
    fn into_iter(self) -> RangeIter {
        self.iter()
    }
}

// ---------------------------------------------------------------------------
// RangeIter
// ---------------------------------------------------------------------------

/// Row-major iterator over the points in a [`Range`].
#[derive(Clone, Debug)]
pub struct RangeIter {
    range: Range,
    cur: Point,
}

impl Iterator for RangeIter {
    type Item = Point;

    #[inline]
    fn next(&mut self) -> Option<Point> {
        if self.cur.y >= self.range.max.y || self.range.is_empty() {
            return None;
        }
        let p = self.cur;
        self.cur.x += 1;
        if self.cur.x >= self.range.max.x {
            self.cur.x = self.range.min.x;
            self.cur.y += 1;
        }
        Some(p)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.range.is_empty() || self.cur.y >= self.range.max.y {
            return (0, Some(0));
        }
        let w = self.range.width() as usize;
        let remaining_in_row = (self.range.max.x - self.cur.x) as usize;
        let remaining_rows = (self.range.max.y - self.cur.y - 1) as usize;
        let total = remaining_in_row + remaining_rows * w;
        (total, Some(total))
    }
}

impl ExactSizeIterator for RangeIter {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_row_col_view() {
        let p = Point::at(2, 5);
        assert_eq!(p, Point::new(5, 2));
        assert_eq!(p.row(), 2);
        assert_eq!(p.col(), 5);
        assert_eq!(p.to_string(), "(2, 5)");
    }

    #[test]
    fn neighbors_in_expansion_order() {
        let n = Point::at(3, 3).neighbors_4();
        assert_eq!(
            n,
            [Point::at(2, 3), Point::at(4, 3), Point::at(3, 2), Point::at(3, 4)]
        );
        assert!(n.iter().all(|&q| q.is_adjacent(Point::at(3, 3))));
        assert!(!Point::at(0, 0).is_adjacent(Point::at(1, 1)));
        assert!(!Point::at(0, 0).is_adjacent(Point::at(0, 0)));
    }

    #[test]
    fn point_ordering_is_row_major() {
        assert!(Point::at(0, 9) < Point::at(1, 0));
        assert!(Point::at(1, 0) < Point::at(1, 1));
    }

    #[test]
    fn range_basics() {
        let r = Range::with_dims(3, 4);
        assert_eq!(r.width(), 4);
        assert_eq!(r.height(), 3);
        assert_eq!(r.len(), 12);
        assert!(r.contains(Point::at(2, 3)));
        assert!(!r.contains(Point::at(3, 0)));
        assert!(!r.contains(Point::at(0, -1)));
    }

    #[test]
    fn range_auto_canonicalize() {
        let r = Range::new(5, 5, 0, 0);
        assert_eq!(r.min, Point::ZERO);
        assert_eq!(r.max, Point::new(5, 5));
    }

    #[test]
    fn index_round_trips_through_point() {
        let r = Range::with_dims(4, 7);
        for (i, p) in r.iter().enumerate() {
            assert_eq!(r.index(p), Some(i));
            assert_eq!(r.point(i), p);
        }
        assert_eq!(r.index(Point::at(4, 0)), None);
    }

    #[test]
    fn range_iter_count() {
        let r = Range::with_dims(3, 5);
        let it = r.iter();
        assert_eq!(it.len(), 15);
        assert_eq!(it.count(), 15);
    }

    #[test]
    fn empty_range_iter() {
        let r = Range::with_dims(0, 5);
        assert!(r.is_empty());
        assert_eq!(r.len(), 0);
        assert_eq!(r.iter().count(), 0);
    }
}
