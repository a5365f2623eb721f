//! The [`Grid`] type — a fixed-size rectangle of [`CellKind`]s with at most
//! one start and one goal.
//!
//! The grid is owned by its caller for the whole session. Search engines
//! only ever borrow it immutably; all search bookkeeping lives elsewhere.

use std::fmt;

use crate::cell::CellKind;
use crate::error::GridError;
use crate::geom::Coord;

/// Default number of rows of a visualizer grid.
pub const DEFAULT_ROWS: i32 = 20;
/// Default number of columns of a visualizer grid.
pub const DEFAULT_COLS: i32 = 20;

/// A `rows` × `cols` grid of cells.
///
/// Invariant: at most one cell is [`CellKind::Start`], at most one is
/// [`CellKind::Goal`], and they are never the same cell. `start`/`goal`
/// mirror those cells so lookups stay O(1).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "GridRepr")
)]
pub struct Grid {
    rows: i32,
    cols: i32,
    cells: Vec<CellKind>,
    start: Option<Coord>,
    goal: Option<Coord>,
}

/// Unchecked wire form of a [`Grid`]. Turned into a grid only through
/// `TryFrom`, which re-establishes every invariant.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct GridRepr {
    rows: i32,
    cols: i32,
    cells: Vec<CellKind>,
    start: Option<Coord>,
    goal: Option<Coord>,
}

#[cfg(feature = "serde")]
impl TryFrom<GridRepr> for Grid {
    type Error = GridError;

    fn try_from(repr: GridRepr) -> Result<Self, GridError> {
        let len = usize::try_from(repr.rows)
            .ok()
            .zip(usize::try_from(repr.cols).ok())
            .and_then(|(r, c)| r.checked_mul(c));
        if len != Some(repr.cells.len()) {
            return Err(GridError::Inconsistent(
                "cell count does not match dimensions",
            ));
        }

        let mut grid = Grid::new(repr.rows, repr.cols);
        for (i, kind) in repr.cells.into_iter().enumerate() {
            let c = grid.coord(i);
            match kind {
                CellKind::Start if grid.start.is_some() => {
                    return Err(GridError::Inconsistent("more than one start cell"));
                }
                CellKind::Goal if grid.goal.is_some() => {
                    return Err(GridError::Inconsistent("more than one goal cell"));
                }
                CellKind::Start => grid.start = Some(c),
                CellKind::Goal => grid.goal = Some(c),
                CellKind::Free | CellKind::Obstacle => {}
            }
            grid.cells[i] = kind;
        }
        if grid.start != repr.start || grid.goal != repr.goal {
            return Err(GridError::Inconsistent(
                "start/goal do not match the cells",
            ));
        }
        Ok(grid)
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(DEFAULT_ROWS, DEFAULT_COLS)
    }
}

impl Grid {
    /// Create a new grid of the given dimensions with every cell free.
    /// Negative dimensions are treated as zero.
    pub fn new(rows: i32, cols: i32) -> Self {
        let rows = rows.max(0);
        let cols = cols.max(0);
        Self {
            rows,
            cols,
            cells: vec![CellKind::Free; (rows as usize) * (cols as usize)],
            start: None,
            goal: None,
        }
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> i32 {
        self.cols
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the grid has no cells at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `c` lies inside the grid.
    #[inline]
    pub fn contains(&self, c: Coord) -> bool {
        c.row >= 0 && c.row < self.rows && c.col >= 0 && c.col < self.cols
    }

    /// Flat row-major index of `c`, or `None` if outside the grid.
    #[inline]
    pub fn index(&self, c: Coord) -> Option<usize> {
        if !self.contains(c) {
            return None;
        }
        Some((c.row as usize) * (self.cols as usize) + (c.col as usize))
    }

    /// Inverse of [`index`](Grid::index). `idx` must be `< len()`.
    #[inline]
    pub fn coord(&self, idx: usize) -> Coord {
        let cols = self.cols as usize;
        Coord::new((idx / cols) as i32, (idx % cols) as i32)
    }

    /// Kind of the cell at `c`, or `None` if outside the grid.
    #[inline]
    pub fn kind(&self, c: Coord) -> Option<CellKind> {
        self.index(c).map(|i| self.cells[i])
    }

    /// The start cell, if set.
    #[inline]
    pub fn start(&self) -> Option<Coord> {
        self.start
    }

    /// The goal cell, if set.
    #[inline]
    pub fn goal(&self) -> Option<Coord> {
        self.goal
    }

    /// Whether `c` is an obstacle. Cells outside the grid are not.
    #[inline]
    pub fn is_obstacle(&self, c: Coord) -> bool {
        self.kind(c) == Some(CellKind::Obstacle)
    }

    /// In-bounds cells orthogonally adjacent to `c`, in the fixed order
    /// up, down, left, right. Empty when `c` itself is outside the grid.
    pub fn adjacent(&self, c: Coord) -> impl Iterator<Item = Coord> + '_ {
        self.contains(c)
            .then(|| c.neighbors_4())
            .into_iter()
            .flatten()
            .filter(move |n| self.contains(*n))
    }

    /// Mark or unmark `c` as an obstacle.
    ///
    /// Marking the start or goal cell as an obstacle clears that endpoint.
    /// Unmarking a cell that is not an obstacle leaves it untouched.
    pub fn set_obstacle(&mut self, c: Coord, obstacle: bool) -> Result<(), GridError> {
        let i = self.checked_index(c)?;
        match (self.cells[i], obstacle) {
            (CellKind::Obstacle, true) => {}
            (_, true) => {
                self.forget_endpoint(c);
                self.cells[i] = CellKind::Obstacle;
            }
            (CellKind::Obstacle, false) => self.cells[i] = CellKind::Free,
            (_, false) => {}
        }
        Ok(())
    }

    /// Flip the obstacle state of `c`; returns the new state.
    pub fn toggle_obstacle(&mut self, c: Coord) -> Result<bool, GridError> {
        let now = !self.is_obstacle(c);
        self.set_obstacle(c, now)?;
        Ok(now)
    }

    /// Make `c` the start cell. Any previous start becomes free; if `c` was
    /// the goal, the goal is cleared.
    pub fn set_start(&mut self, c: Coord) -> Result<(), GridError> {
        let i = self.checked_index(c)?;
        self.clear_start();
        self.forget_endpoint(c);
        self.cells[i] = CellKind::Start;
        self.start = Some(c);
        Ok(())
    }

    /// Make `c` the goal cell. Any previous goal becomes free; if `c` was the
    /// start, the start is cleared.
    pub fn set_goal(&mut self, c: Coord) -> Result<(), GridError> {
        let i = self.checked_index(c)?;
        self.clear_goal();
        self.forget_endpoint(c);
        self.cells[i] = CellKind::Goal;
        self.goal = Some(c);
        Ok(())
    }

    /// Unset the start cell, if any.
    pub fn clear_start(&mut self) {
        if let Some(i) = self.start.take().and_then(|s| self.index(s)) {
            self.cells[i] = CellKind::Free;
        }
    }

    /// Unset the goal cell, if any.
    pub fn clear_goal(&mut self) {
        if let Some(i) = self.goal.take().and_then(|g| self.index(g)) {
            self.cells[i] = CellKind::Free;
        }
    }

    /// Clear every obstacle, start and goal marking.
    pub fn reset(&mut self) {
        self.cells.fill(CellKind::Free);
        self.start = None;
        self.goal = None;
    }

    /// Row-major iterator over every coordinate of the grid.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.cells.len()).map(move |i| self.coord(i))
    }

    /// Row-major iterator over `(Coord, CellKind)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, CellKind)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &kind)| (self.coord(i), kind))
    }

    /// Number of obstacle cells.
    pub fn obstacle_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|k| **k == CellKind::Obstacle)
            .count()
    }

    /// Re-decide every cell other than the start and goal, in row-major
    /// order: obstacle where `obstacle(c)` is true, free otherwise.
    pub fn reroll_obstacles(&mut self, mut obstacle: impl FnMut(Coord) -> bool) {
        for i in 0..self.cells.len() {
            if self.cells[i].is_endpoint() {
                continue;
            }
            self.cells[i] = if obstacle(self.coord(i)) {
                CellKind::Obstacle
            } else {
                CellKind::Free
            };
        }
    }

    /// Build a grid from its text snapshot: one line per row, one glyph per
    /// cell (`.` free, `#` obstacle, `S` start, `G` goal). Blank leading and
    /// trailing lines and surrounding whitespace are ignored.
    pub fn from_ascii(text: &str) -> Result<Self, GridError> {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .skip_while(|l| l.is_empty())
            .collect();
        let lines: Vec<&str> = match lines.iter().rposition(|l| !l.is_empty()) {
            Some(last) => lines[..=last].to_vec(),
            None => Vec::new(),
        };

        let rows = lines.len() as i32;
        let cols = lines.first().map_or(0, |l| l.chars().count()) as i32;
        let mut grid = Grid::new(rows, cols);

        for (row, line) in lines.iter().enumerate() {
            let parse_err = |reason: String| GridError::Parse {
                line: row + 1,
                reason,
            };
            if line.chars().count() as i32 != cols {
                return Err(parse_err(format!(
                    "expected {cols} cells, found {}",
                    line.chars().count()
                )));
            }
            for (col, ch) in line.chars().enumerate() {
                let c = Coord::new(row as i32, col as i32);
                let kind = CellKind::from_glyph(ch)
                    .ok_or_else(|| parse_err(format!("unknown cell glyph {ch:?}")))?;
                match kind {
                    CellKind::Free => {}
                    CellKind::Obstacle => grid.set_obstacle(c, true)?,
                    CellKind::Start if grid.start.is_some() => {
                        return Err(parse_err("more than one start cell".into()));
                    }
                    CellKind::Start => grid.set_start(c)?,
                    CellKind::Goal if grid.goal.is_some() => {
                        return Err(parse_err("more than one goal cell".into()));
                    }
                    CellKind::Goal => grid.set_goal(c)?,
                }
            }
        }
        Ok(grid)
    }

    #[inline]
    fn checked_index(&self, c: Coord) -> Result<usize, GridError> {
        self.index(c).ok_or(GridError::OutOfBounds {
            coord: c,
            rows: self.rows,
            cols: self.cols,
        })
    }

    /// Drop the start/goal reference if it points at `c`. The cell kind
    /// itself is overwritten by the caller.
    fn forget_endpoint(&mut self, c: Coord) {
        if self.start == Some(c) {
            self.start = None;
        }
        if self.goal == Some(c) {
            self.goal = None;
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.cols.max(1) as usize) {
            for kind in row {
                write!(f, "{}", kind.glyph())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn grid_round_trip() {
        let g = Grid::from_ascii("S.#\n..G").unwrap();
        let json = serde_json::to_string(&g).unwrap();
        let back: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, g);
        assert_eq!(back.start(), Some(Coord::new(0, 0)));
    }

    fn decode(json: &str) -> Result<Grid, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[test]
    fn rejects_wrong_cell_count() {
        let res = decode(r#"{"rows":3,"cols":3,"cells":[],"start":{"row":0,"col":0},"goal":null}"#);
        assert!(res.is_err());
        let res = decode(r#"{"rows":-1,"cols":0,"cells":[],"start":null,"goal":null}"#);
        assert!(res.is_err());
    }

    #[test]
    fn rejects_duplicate_endpoints() {
        let res = decode(
            r#"{"rows":1,"cols":2,"cells":["Start","Start"],"start":{"row":0,"col":0},"goal":null}"#,
        );
        assert!(res.unwrap_err().to_string().contains("more than one start"));
        let res = decode(
            r#"{"rows":1,"cols":2,"cells":["Goal","Goal"],"start":null,"goal":{"row":0,"col":1}}"#,
        );
        assert!(res.unwrap_err().to_string().contains("more than one goal"));
    }

    #[test]
    fn rejects_endpoints_that_disagree_with_cells() {
        let res = decode(
            r#"{"rows":1,"cols":2,"cells":["Free","Free"],"start":{"row":0,"col":0},"goal":null}"#,
        );
        assert!(res.is_err());
        let res = decode(
            r#"{"rows":1,"cols":2,"cells":["Start","Goal"],"start":{"row":0,"col":0},"goal":null}"#,
        );
        assert!(res.is_err());
    }

    #[test]
    fn decoded_grid_is_usable() {
        let g = decode(
            r#"{"rows":1,"cols":3,"cells":["Start","Obstacle","Goal"],"start":{"row":0,"col":0},"goal":{"row":0,"col":2}}"#,
        )
        .unwrap();
        assert_eq!(g, Grid::from_ascii("S#G").unwrap());
        assert_eq!(g.kind(Coord::new(0, 1)), Some(CellKind::Obstacle));
    }
}
