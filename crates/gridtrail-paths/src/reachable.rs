//! Reachable-component flood fill.

use gridtrail_core::Point;

use crate::SearchRange;
use crate::traits::Pather;

impl SearchRange {
    /// Flood-fill from `p` and return every cell connected to it through
    /// `pather` neighbors, `p` included, in discovery order.
    ///
    /// Returns an empty vector if `p` lies outside the range. This reuses
    /// the visited buffer of the last search.
    pub fn reachable<P: Pather>(&mut self, pather: &P, p: Point) -> Vec<Point> {
        self.reset();

        let mut result = Vec::new();
        let Some(si) = self.idx(p) else {
            return result;
        };

        let mut nbuf = std::mem::take(&mut self.nbuf);

        self.stack.push(si);
        self.visited[si] = true;
        result.push(p);

        while let Some(ci) = self.stack.pop() {
            let cp = self.rng.point(ci);
            nbuf.clear();
            pather.neighbors(cp, &mut nbuf);

            for &np in nbuf.iter() {
                if let Some(ni) = self.idx(np) {
                    if !self.visited[ni] {
                        self.visited[ni] = true;
                        self.stack.push(ni);
                        result.push(np);
                    }
                }
            }
        }

        self.nbuf = nbuf;
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridtrail_core::Grid;

    #[test]
    fn wall_splits_components() {
        let g = Grid::parse("...\n###\n.T.").unwrap();
        let mut sr = SearchRange::new(g.bounds());

        let mut top = sr.reachable(&g, Point::at(0, 1));
        top.sort();
        assert_eq!(top, vec![Point::at(0, 0), Point::at(0, 1), Point::at(0, 2)]);

        let bottom = sr.reachable(&g, Point::at(2, 2));
        assert_eq!(bottom.len(), 3);
        assert!(bottom.contains(&Point::at(2, 1)));
    }

    #[test]
    fn outside_range_is_empty() {
        let g = Grid::new(2, 2);
        let mut sr = SearchRange::new(g.bounds());
        assert!(sr.reachable(&g, Point::at(5, 5)).is_empty());
        assert_eq!(sr.reachable(&g, Point::at(0, 0)).len(), 4);
    }
}
