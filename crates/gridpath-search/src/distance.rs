use gridpath_core::Coord;

/// Manhattan (L1) distance between two cells.
#[inline]
pub fn manhattan(a: Coord, b: Coord) -> i32 {
    a.manhattan(b)
}
