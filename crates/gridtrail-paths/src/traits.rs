use gridtrail_core::{Grid, Point};

/// Minimal pathfinding interface — provides neighbor enumeration.
pub trait Pather {
    /// Append neighbors of `p` into `buf`. The caller clears `buf` before calling.
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>);
}

impl Pather for Grid {
    /// In-bounds, non-obstacle cardinal neighbors in up, down, left, right
    /// order.
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        buf.extend(p.neighbors_4().into_iter().filter(|&n| self.is_passable(n)));
    }
}
