//! Turning editor state into something drawable.

use std::collections::HashSet;

use gridpath_core::{CellKind, Coord};
use gridpath_search::SearchOutcome;

use crate::editor::{Editor, Mode};

/// Visual class of a board cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Tint {
    Free,
    Obstacle,
    Start,
    Goal,
    /// A revealed cell of the found path.
    Path,
}

impl Tint {
    pub const fn glyph(self) -> char {
        match self {
            Tint::Free => '.',
            Tint::Obstacle => '#',
            Tint::Start => 'S',
            Tint::Goal => 'G',
            Tint::Path => '*',
        }
    }
}

impl From<CellKind> for Tint {
    fn from(kind: CellKind) -> Self {
        match kind {
            CellKind::Free => Tint::Free,
            CellKind::Obstacle => Tint::Obstacle,
            CellKind::Start => Tint::Start,
            CellKind::Goal => Tint::Goal,
        }
    }
}

/// One screenful: the board plus its text lines.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub cells: Vec<Vec<Tint>>,
    pub cursor: Option<Coord>,
    pub status: String,
}

impl Frame {
    /// Build a frame showing the first `revealed` cells of the current path.
    pub fn new(editor: &Editor, revealed: usize, cursor: Option<Coord>) -> Self {
        Self {
            cells: board(editor, revealed),
            cursor,
            status: status_line(editor),
        }
    }

    /// Plain-text rendering: one line per row, then the status line.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for row in &self.cells {
            out.extend(row.iter().map(|t| t.glyph()));
            out.push('\n');
        }
        out.push_str(&self.status);
        out.push('\n');
        out
    }
}

/// Board tints, row-major. Start and goal keep their own tint even though
/// they are part of the path.
pub fn board(editor: &Editor, revealed: usize) -> Vec<Vec<Tint>> {
    let grid = editor.grid();
    let shown: HashSet<Coord> = editor
        .path()
        .map(|p| p.iter().take(revealed).copied().collect())
        .unwrap_or_default();

    let mut rows = vec![Vec::with_capacity(grid.cols() as usize); grid.rows() as usize];
    for (c, kind) in grid.iter() {
        let tint = match kind {
            CellKind::Free if shown.contains(&c) => Tint::Path,
            other => Tint::from(other),
        };
        rows[c.row as usize].push(tint);
    }
    rows
}

/// One-line summary of the editor state.
pub fn status_line(editor: &Editor) -> String {
    let mode = match editor.mode() {
        Mode::PlaceEndpoints => "place endpoints",
        Mode::PaintObstacles => "paint obstacles",
    };
    let result = match editor.outcome() {
        Some(SearchOutcome::Found(path)) => format!(
            "path: {} cells ({} steps), {} expanded",
            path.len(),
            path.cost(),
            editor.expanded()
        ),
        Some(SearchOutcome::NotFound) => "no path: goal unreachable".to_string(),
        None => {
            let grid = editor.grid();
            match (grid.start(), grid.goal()) {
                (None, _) => "click to set the start".to_string(),
                (Some(_), None) => "click to set the goal".to_string(),
                (Some(s), Some(g)) => format!("ready: {s} -> {g}"),
            }
        }
    };
    format!("[{mode}] {result}")
}
