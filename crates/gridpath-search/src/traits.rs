use gridpath_core::{Coord, Grid};

use crate::distance::manhattan;

/// Minimal pathfinding interface — provides neighbor enumeration.
pub trait Pather {
    /// Append the passable neighbors of `c` into `buf`, in a fixed order.
    /// The caller clears `buf` before calling.
    fn neighbors(&self, c: Coord, buf: &mut Vec<Coord>);
}

/// Pather with an admissible heuristic.
pub trait AstarPather: Pather {
    /// Estimate of the number of steps from `from` to `to`.
    /// Must never overestimate the true cost (admissible).
    fn estimate(&self, from: Coord, to: Coord) -> i32;
}

impl Pather for Grid {
    fn neighbors(&self, c: Coord, buf: &mut Vec<Coord>) {
        buf.extend(self.adjacent(c).filter(|n| !self.is_obstacle(*n)));
    }
}

impl AstarPather for Grid {
    fn estimate(&self, from: Coord, to: Coord) -> i32 {
        manhattan(from, to)
    }
}
