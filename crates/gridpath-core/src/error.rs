//! Errors reported by the grid model.

use thiserror::Error;

use crate::geom::Coord;

/// Error type for grid mutations and text parsing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// A coordinate outside `0..rows` × `0..cols` was passed to a mutator.
    #[error("coordinate {coord} is outside the {rows}x{cols} grid")]
    OutOfBounds { coord: Coord, rows: i32, cols: i32 },

    /// A text snapshot could not be turned into a grid.
    #[error("grid text, line {line}: {reason}")]
    Parse { line: usize, reason: String },

    /// A serialized grid disagrees with itself.
    #[error("inconsistent grid: {0}")]
    Inconsistent(&'static str),
}
