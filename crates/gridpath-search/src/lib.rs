//! A* shortest-path search over [`gridpath_core::Grid`].
//!
//! The engine is [`PathSearch`]: it borrows a grid read-only, keeps all
//! per-cell search records (`g`, `h`, `f`, back-link) in its own
//! generation-stamped side table, and returns either an ordered [`Path`] or
//! [`SearchOutcome::NotFound`]. Precondition violations are reported as
//! [`SearchError`].
//!
//! Movement is 4-directional with unit cost, and the heuristic is the
//! Manhattan distance, so every path returned is a shortest one. Among
//! equal-cost candidates the open set always expands the cell that entered
//! it first, which makes results reproducible.
//!
//! # Trait hierarchy
//!
//! | Trait | Provides |
//! |---|---|
//! | [`Pather`] | passable neighbours in a fixed order |
//! | [`AstarPather`] : [`Pather`] | admissible distance estimate |

mod astar;
mod distance;
mod error;
mod search;
mod traits;

pub use astar::{find_path, find_path_between};
pub use distance::manhattan;
pub use error::SearchError;
pub use search::{Path, PathSearch, SearchOutcome};
pub use traits::{AstarPather, Pather};
