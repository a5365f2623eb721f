use std::collections::BinaryHeap;

use gridpath_core::{Coord, Grid};

#[cfg(feature = "serde")]
use crate::error::SearchError;

/// An ordered sequence of cells from start to goal, both inclusive.
///
/// Consecutive cells are orthogonally adjacent and none is an obstacle.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "PathRepr")
)]
pub struct Path {
    cells: Vec<Coord>,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct PathRepr {
    cells: Vec<Coord>,
}

#[cfg(feature = "serde")]
impl TryFrom<PathRepr> for Path {
    type Error = SearchError;

    fn try_from(repr: PathRepr) -> Result<Self, SearchError> {
        if repr.cells.is_empty() {
            return Err(SearchError::InvalidPath("no cells"));
        }
        let path = Path { cells: repr.cells };
        if !path.is_connected() {
            return Err(SearchError::InvalidPath("non-adjacent step"));
        }
        Ok(path)
    }
}

impl Path {
    pub(crate) fn from_cells(cells: Vec<Coord>) -> Self {
        debug_assert!(!cells.is_empty());
        Self { cells }
    }

    /// The cells in start → goal order.
    #[inline]
    pub fn cells(&self) -> &[Coord] {
        &self.cells
    }

    /// Consume the path, returning its cells.
    #[inline]
    pub fn into_cells(self) -> Vec<Coord> {
        self.cells
    }

    /// Number of cells, endpoints included.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false`: a path holds at least its start cell.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of steps (edges) along the path.
    #[inline]
    pub fn cost(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }

    /// First cell.
    #[inline]
    pub fn start(&self) -> Coord {
        self.cells[0]
    }

    /// Last cell.
    #[inline]
    pub fn goal(&self) -> Coord {
        self.cells[self.cells.len() - 1]
    }

    /// Whether `c` is on the path.
    pub fn contains(&self, c: Coord) -> bool {
        self.cells.contains(&c)
    }

    /// Whether every consecutive pair of cells is orthogonally adjacent.
    pub fn is_connected(&self) -> bool {
        self.cells.windows(2).all(|w| w[0].is_adjacent(w[1]))
    }

    /// Iterator over the cells in start → goal order.
    pub fn iter(&self) -> std::slice::Iter<'_, Coord> {
        self.cells.iter()
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Coord;
    type IntoIter = std::slice::Iter<'a, Coord>;
    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

/// Result of a search that could be attempted.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchOutcome {
    /// A shortest path from start to goal.
    Found(Path),
    /// The goal cannot be reached from the start.
    NotFound,
}

impl SearchOutcome {
    /// Whether a path was found.
    #[inline]
    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found(_))
    }

    /// The path, if one was found.
    #[inline]
    pub fn path(&self) -> Option<&Path> {
        match self {
            SearchOutcome::Found(p) => Some(p),
            SearchOutcome::NotFound => None,
        }
    }

    /// Consume the outcome, returning the path if one was found.
    #[inline]
    pub fn into_path(self) -> Option<Path> {
        match self {
            SearchOutcome::Found(p) => Some(p),
            SearchOutcome::NotFound => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Per-run search records
// ---------------------------------------------------------------------------

/// Search record of one cell. Only meaningful when `generation` equals the
/// engine's current generation; anything else is left over from an earlier
/// run and is treated as never seen.
#[derive(Clone, Debug)]
pub(crate) struct Node {
    pub(crate) g: i32,
    pub(crate) h: i32,
    pub(crate) f: i32,
    pub(crate) parent: usize,
    /// Order in which the cell first entered the open set during this run.
    pub(crate) seq: u64,
    pub(crate) generation: u32,
    pub(crate) open: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: 0,
            h: 0,
            f: 0,
            parent: usize::MAX,
            seq: 0,
            generation: 0,
            open: false,
        }
    }
}

/// Open-set entry, ordered by `f` then by first-insertion order, for use in
/// `BinaryHeap`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct NodeRef {
    pub(crate) idx: usize,
    pub(crate) f: i32,
    pub(crate) seq: u64,
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest f first, and among
        // equal f the cell that joined the open set earliest.
        other.f.cmp(&self.f).then(other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ---------------------------------------------------------------------------
// PathSearch
// ---------------------------------------------------------------------------

/// The A* engine for grids of a given size.
///
/// `PathSearch` owns the per-cell record table, the open-set heap and a
/// neighbour buffer, so repeated searches reuse their allocations. Each run
/// starts a new generation; records stamped with an older generation are
/// ignored, so nothing from a previous run can influence a new one.
#[derive(Debug, Clone)]
pub struct PathSearch {
    pub(crate) rows: i32,
    pub(crate) cols: i32,
    pub(crate) nodes: Vec<Node>,
    pub(crate) generation: u32,
    pub(crate) open: BinaryHeap<NodeRef>,
    pub(crate) next_seq: u64,
    pub(crate) expanded: usize,
    pub(crate) nbuf: Vec<Coord>,
}

impl PathSearch {
    /// Create an engine for `rows` × `cols` grids.
    pub fn new(rows: i32, cols: i32) -> Self {
        let rows = rows.max(0);
        let cols = cols.max(0);
        Self {
            rows,
            cols,
            nodes: vec![Node::default(); (rows as usize) * (cols as usize)],
            generation: 0,
            open: BinaryHeap::new(),
            next_seq: 0,
            expanded: 0,
            nbuf: Vec::with_capacity(4),
        }
    }

    /// Create an engine sized for `grid`.
    pub fn for_grid(grid: &Grid) -> Self {
        Self::new(grid.rows(), grid.cols())
    }

    /// Change the grid size the engine works on.
    ///
    /// If the new size fits within the existing table, the table is kept and
    /// only the generation is bumped. Otherwise it is reallocated.
    pub fn set_size(&mut self, rows: i32, cols: i32) {
        let rows = rows.max(0);
        let cols = cols.max(0);
        let len = (rows as usize) * (cols as usize);
        self.rows = rows;
        self.cols = cols;

        if len <= self.nodes.len() {
            self.bump_generation();
            return;
        }

        self.nodes.clear();
        self.nodes.resize(len, Node::default());
        self.generation = 0;
    }

    /// Grid size as `(rows, cols)`.
    #[inline]
    pub fn size(&self) -> (i32, i32) {
        (self.rows, self.cols)
    }

    /// Number of cells expanded (moved to the closed set) by the last run.
    #[inline]
    pub fn expanded(&self) -> usize {
        self.expanded
    }

    /// Start a new run: invalidate every record.
    pub(crate) fn bump_generation(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            // Wrapped: stamps from 2^32 runs ago would look current again.
            self.nodes.fill(Node::default());
            self.generation = 1;
        }
    }

    // -----------------------------------------------------------------------
    // Coordinate helpers
    // -----------------------------------------------------------------------

    /// Convert a `Coord` to a flat index. Returns `None` if out of range.
    #[inline]
    pub(crate) fn idx(&self, c: Coord) -> Option<usize> {
        if c.row < 0 || c.row >= self.rows || c.col < 0 || c.col >= self.cols {
            return None;
        }
        Some((c.row as usize) * (self.cols as usize) + (c.col as usize))
    }

    /// Convert a flat index back to a `Coord`.
    #[inline]
    pub(crate) fn coord(&self, idx: usize) -> Coord {
        let cols = self.cols as usize;
        Coord::new((idx / cols) as i32, (idx % cols) as i32)
    }
}
