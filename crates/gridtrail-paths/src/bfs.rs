use gridtrail_core::{CellState, Grid, Point};

use crate::error::SearchError;
use crate::search::{Entry, NO_PARENT, SearchRange};
use crate::trace::{ExplorationEvent, Path, Search, Trace};
use crate::traits::Pather;

/// Run a single breadth-first search from `start` to `target` on `grid`.
///
/// See [`SearchRange::bfs_path`]. The grid's explored overlay is written.
pub fn find_path(grid: &mut Grid, start: Point, target: Point) -> Result<Search, SearchError> {
    SearchRange::new(grid.bounds()).bfs_path(grid, start, target)
}

impl SearchRange {
    /// Breadth-first search for a shortest path from `start` to `target`.
    ///
    /// The frontier is FIFO. Each dequeued entry is handled as follows:
    ///
    /// 1. If it is the target, a final event is recorded and the entry's
    ///    path is returned.
    /// 2. If its cell was already visited, the entry is dropped.
    /// 3. Otherwise the cell is marked visited and explored on `grid`, an
    ///    event is recorded, and every passable, unvisited neighbor is
    ///    enqueued in up, down, left, right order.
    ///
    /// Visited cells are filtered when dequeued, not when enqueued, so a
    /// cell may sit in the frontier several times; only its first dequeue
    /// is processed. `start == target` yields the one-cell path.
    ///
    /// If the frontier empties first the result has no path, and the trace
    /// covers exactly the component reachable from `start`.
    pub fn bfs_path(
        &mut self,
        grid: &mut Grid,
        start: Point,
        target: Point,
    ) -> Result<Search, SearchError> {
        check_endpoints(grid, start, target)?;

        if self.rng != grid.bounds() {
            self.set_range(grid.bounds());
        } else {
            self.reset();
        }

        let mut trace = Trace::default();
        let mut nbuf = std::mem::take(&mut self.nbuf);
        let mut peak = 1;

        self.entries.push(Entry {
            pos: start,
            parent: NO_PARENT,
        });
        self.frontier.push_back(0);

        let mut found = None;
        while let Some(ei) = self.frontier.pop_front() {
            let cp = self.entries[ei].pos;

            if cp == target {
                trace.push(ExplorationEvent {
                    snapshot: grid.snapshot(),
                    cursor: cp,
                });
                found = Some(ei);
                break;
            }

            let Some(ci) = self.idx(cp) else {
                continue;
            };
            if self.visited[ci] {
                continue;
            }
            self.visited[ci] = true;
            grid.mark_explored(cp);
            trace.push(ExplorationEvent {
                snapshot: grid.snapshot(),
                cursor: cp,
            });
            log::trace!("bfs: explored {cp}");

            nbuf.clear();
            grid.neighbors(cp, &mut nbuf);
            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                if self.visited[ni] {
                    continue;
                }
                self.entries.push(Entry { pos: np, parent: ei });
                self.frontier.push_back(self.entries.len() - 1);
            }
            peak = peak.max(self.frontier.len());
        }

        self.nbuf = nbuf;
        let path = found.map(|ei| Path::new(self.path_to(ei)));
        match &path {
            Some(p) => log::debug!(
                "bfs: {start} -> {target} in {} steps, {} events, frontier peak {peak}",
                p.steps(),
                trace.len()
            ),
            None => log::debug!(
                "bfs: no path {start} -> {target}, {} events, frontier peak {peak}",
                trace.len()
            ),
        }
        Ok(Search { path, trace })
    }
}

fn check_endpoints(grid: &Grid, start: Point, target: Point) -> Result<(), SearchError> {
    let start_state = grid.at(start).ok_or(SearchError::OutOfBounds(start))?;
    let target_state = grid.at(target).ok_or(SearchError::OutOfBounds(target))?;
    if start_state == CellState::Obstacle {
        return Err(SearchError::StartOnObstacle(start));
    }
    if target_state == CellState::Obstacle {
        return Err(SearchError::TargetOnObstacle(target));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridtrail_core::Mark;

    fn cursors(s: &Search) -> Vec<Point> {
        s.trace.cursors().collect()
    }

    #[test]
    fn ties_break_down_before_right() {
        let mut g = Grid::parse("..\n.T").unwrap();
        let s = find_path(&mut g, Point::at(0, 0), Point::at(1, 1)).unwrap();
        assert_eq!(
            s.path.as_ref().unwrap().positions(),
            &[Point::at(0, 0), Point::at(1, 0), Point::at(1, 1)]
        );
        assert_eq!(
            cursors(&s),
            vec![Point::at(0, 0), Point::at(1, 0), Point::at(0, 1), Point::at(1, 1)]
        );
    }

    #[test]
    fn duplicate_entries_are_skipped_at_dequeue() {
        // (1, 1) is enqueued from both (1, 0) and (0, 1).
        let mut g = Grid::parse("..\n..\n##\nT.").unwrap();
        let s = find_path(&mut g, Point::at(0, 0), Point::at(3, 0)).unwrap();
        assert!(!s.found());
        assert_eq!(
            cursors(&s),
            vec![Point::at(0, 0), Point::at(1, 0), Point::at(0, 1), Point::at(1, 1)]
        );
        assert_eq!(g.explored_count(), 4);
    }

    #[test]
    fn events_capture_grid_at_that_moment() {
        let mut g = Grid::parse("...T").unwrap();
        let s = find_path(&mut g, Point::at(0, 0), Point::at(0, 3)).unwrap();
        let counts: Vec<usize> = s
            .trace
            .iter()
            .map(|e| e.snapshot.count(Mark::Explored))
            .collect();
        assert_eq!(counts, vec![1, 2, 3, 3]);

        let first = &s.trace.events()[0];
        assert_eq!(first.snapshot.at(Point::at(0, 0)), Some(Mark::Explored));
        assert_eq!(first.snapshot.at(Point::at(0, 1)), Some(Mark::Open));

        let last = s.trace.last().unwrap();
        assert_eq!(last.cursor, Point::at(0, 3));
        assert_eq!(last.snapshot.at(Point::at(0, 3)), Some(Mark::Target));
    }

    #[test]
    fn start_equal_target_is_trivial() {
        let mut g = Grid::parse(".T.").unwrap();
        let t = Point::at(0, 1);
        let s = find_path(&mut g, t, t).unwrap();
        assert_eq!(s.path.as_ref().unwrap().positions(), &[t]);
        assert_eq!(s.steps(), Some(0));
        assert_eq!(s.trace.len(), 1);
        assert_eq!(g.explored_count(), 0);
    }

    #[test]
    fn search_keeps_topology() {
        let mut g = Grid::parse(".#.\n...\n#.T").unwrap();
        let pristine = g.clone();
        let s = find_path(&mut g, Point::at(0, 0), Point::at(2, 2)).unwrap();
        assert_eq!(s.steps(), Some(4));
        assert_eq!(g.count(CellState::Obstacle), 2);
        assert_eq!(g.target(), Some(Point::at(2, 2)));
        assert_ne!(g, pristine);
        g.clear_explored();
        assert_eq!(g, pristine);
    }

    #[test]
    fn invalid_endpoints() {
        let mut g = Grid::parse("#.\n.T").unwrap();
        let t = Point::at(1, 1);
        assert_eq!(
            find_path(&mut g, Point::at(0, 0), t),
            Err(SearchError::StartOnObstacle(Point::at(0, 0)))
        );
        assert_eq!(
            find_path(&mut g, Point::at(2, 0), t),
            Err(SearchError::OutOfBounds(Point::at(2, 0)))
        );
        assert_eq!(
            find_path(&mut g, Point::at(0, 1), Point::at(0, -1)),
            Err(SearchError::OutOfBounds(Point::at(0, -1)))
        );
        assert_eq!(
            find_path(&mut g, Point::at(0, 1), Point::at(0, 0)),
            Err(SearchError::TargetOnObstacle(Point::at(0, 0)))
        );
        assert_eq!(g.explored_count(), 0);
    }

    #[test]
    fn reused_range_matches_fresh_search() {
        let layout = "....\n.##.\n...T";
        let mut sr = SearchRange::new(Grid::new(1, 1).bounds());
        let mut g = Grid::parse(layout).unwrap();
        let first = sr.bfs_path(&mut g, Point::at(0, 0), Point::at(2, 3)).unwrap();
        g.clear_explored();
        let second = sr.bfs_path(&mut g, Point::at(0, 0), Point::at(2, 3)).unwrap();

        let mut fresh = Grid::parse(layout).unwrap();
        let expected = find_path(&mut fresh, Point::at(0, 0), Point::at(2, 3)).unwrap();
        assert_eq!(first, expected);
        assert_eq!(second, expected);
    }
}
