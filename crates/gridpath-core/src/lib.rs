//! **gridpath-core** — the grid model behind the gridpath A* visualizer.
//!
//! This crate owns the fixed-size 2D arrangement of cells that a user edits:
//! coordinates, each cell's role (free, obstacle, start, goal) and the
//! 4-directional adjacency relation the search engine walks.
//!
//! It carries no search state. Scratch data such as costs and back-links
//! lives in the engine's own per-run tables (see `gridpath-search`).

pub mod cell;
pub mod error;
pub mod geom;
pub mod grid;

pub use cell::CellKind;
pub use error::GridError;
pub use geom::Coord;
pub use grid::{DEFAULT_COLS, DEFAULT_ROWS, Grid};
