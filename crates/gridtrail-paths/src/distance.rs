use gridtrail_core::Point;

/// Manhattan (L1) distance: the fewest 4-connected moves on an open grid.
#[inline]
pub fn manhattan(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}
