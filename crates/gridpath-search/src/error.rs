use gridpath_core::Coord;
use thiserror::Error;

/// Reasons a search could not be attempted.
///
/// An unreachable goal is not an error: it is reported as
/// [`SearchOutcome::NotFound`](crate::SearchOutcome::NotFound).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    /// The start or the goal cell is not set.
    #[error("start and goal must both be set before searching")]
    MissingEndpoints,

    /// An endpoint lies outside the grid.
    #[error("endpoint {0} is outside the grid")]
    OutOfBounds(Coord),

    /// A serialized path is empty or takes a non-adjacent step.
    #[error("invalid path: {0}")]
    InvalidPath(&'static str),
}
