//! Search results: the path and the exploration trace.

use gridtrail_core::{Point, Snapshot};

/// A 4-connected path, first element the start, last element the target.
///
/// A path is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path(Vec<Point>);

impl Path {
    pub(crate) fn new(positions: Vec<Point>) -> Self {
        debug_assert!(!positions.is_empty());
        Self(positions)
    }

    /// The positions along the path.
    pub fn positions(&self) -> &[Point] {
        &self.0
    }

    /// First position.
    pub fn start(&self) -> Point {
        self.0[0]
    }

    /// Last position.
    pub fn end(&self) -> Point {
        self.0[self.0.len() - 1]
    }

    /// Number of positions.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of moves: one less than the number of positions.
    pub fn steps(&self) -> usize {
        self.0.len() - 1
    }

    pub fn into_vec(self) -> Vec<Point> {
        self.0
    }
}

/// One processed cell: the annotated grid right after processing it, and
/// the cell itself.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExplorationEvent {
    pub snapshot: Snapshot,
    pub cursor: Point,
}

/// Chronological record of the cells a search processed.
///
/// Each cell appears as a cursor at most once. A renderer plays the events
/// back in order, once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trace {
    events: Vec<ExplorationEvent>,
}

impl Trace {
    pub(crate) fn push(&mut self, event: ExplorationEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[ExplorationEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn last(&self) -> Option<&ExplorationEvent> {
        self.events.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ExplorationEvent> {
        self.events.iter()
    }

    /// The processed cells in order.
    pub fn cursors(&self) -> impl Iterator<Item = Point> + '_ {
        self.events.iter().map(|e| e.cursor)
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a ExplorationEvent;
    type IntoIter = std::slice::Iter<'a, ExplorationEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

impl IntoIterator for Trace {
    type Item = ExplorationEvent;
    type IntoIter = std::vec::IntoIter<ExplorationEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.into_iter()
    }
}

/// Outcome of one search. `path` is `None` when the target is unreachable;
/// that is a normal result, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Search {
    pub path: Option<Path>,
    pub trace: Trace,
}

impl Search {
    /// Whether a path to the target was found.
    pub fn found(&self) -> bool {
        self.path.is_some()
    }

    /// Steps along the path, if one was found.
    pub fn steps(&self) -> Option<usize> {
        self.path.as_ref().map(Path::steps)
    }
}
