//! Geometry primitive: [`Coord`], a (row, col) grid coordinate.

use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

/// A cell coordinate. Rows grow downwards, columns grow to the right.
///
/// Coordinates are signed so that neighbours of border cells can be computed
/// and then rejected by a bounds check instead of underflowing.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub row: i32,
    pub col: i32,
}

impl Coord {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { row: 0, col: 0 };

    /// Create a new coordinate.
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Return a coordinate shifted by (drow, dcol).
    #[inline]
    pub const fn shift(self, drow: i32, dcol: i32) -> Self {
        Self {
            row: self.row + drow,
            col: self.col + dcol,
        }
    }

    /// The four cardinal neighbours in search order: up, down, left, right.
    ///
    /// The order is part of the search contract: it decides which of several
    /// equal-cost paths is returned.
    #[inline]
    pub const fn neighbors_4(self) -> [Coord; 4] {
        [
            self.shift(-1, 0),
            self.shift(1, 0),
            self.shift(0, -1),
            self.shift(0, 1),
        ]
    }

    /// Manhattan (L1) distance to `other`.
    #[inline]
    pub const fn manhattan(self, other: Coord) -> i32 {
        (self.row - other.row).abs() + (self.col - other.col).abs()
    }

    /// Whether `other` differs by exactly one unit in exactly one axis.
    #[inline]
    pub const fn is_adjacent(self, other: Coord) -> bool {
        matches!(
            (self.row.abs_diff(other.row), self.col.abs_diff(other.col)),
            (0, 1) | (1, 0)
        )
    }
}

// --- trait impls for Coord ---

impl PartialOrd for Coord {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Coord {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.row.cmp(&other.row).then(self.col.cmp(&other.col))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(i32, i32)> for Coord {
    #[inline]
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}

impl Add for Coord {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.row + rhs.row, self.col + rhs.col)
    }
}

impl Sub for Coord {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.row - rhs.row, self.col - rhs.col)
    }
}

/// Parses `"row,col"`, optionally wrapped in parentheses, e.g. `"3,4"` or
/// `"(3, 4)"`.
impl FromStr for Coord {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let inner = s
            .trim()
            .trim_start_matches('(')
            .trim_end_matches(')');
        let (row, col) = inner
            .split_once(',')
            .ok_or_else(|| format!("expected \"row,col\", got {s:?}"))?;
        let row = row
            .trim()
            .parse::<i32>()
            .map_err(|e| format!("bad row in {s:?}: {e}"))?;
        let col = col
            .trim()
            .parse::<i32>()
            .map_err(|e| format!("bad column in {s:?}: {e}"))?;
        Ok(Self::new(row, col))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coord_arithmetic() {
        let a = Coord::new(1, 2);
        let b = Coord::new(3, 4);
        assert_eq!(a + b, Coord::new(4, 6));
        assert_eq!(b - a, Coord::new(2, 2));
        assert_eq!(a.shift(-1, 1), Coord::new(0, 3));
    }

    #[test]
    fn neighbors_are_up_down_left_right() {
        let c = Coord::new(5, 5);
        assert_eq!(
            c.neighbors_4(),
            [
                Coord::new(4, 5),
                Coord::new(6, 5),
                Coord::new(5, 4),
                Coord::new(5, 6),
            ]
        );
    }

    #[test]
    fn manhattan_distance() {
        assert_eq!(Coord::new(0, 0).manhattan(Coord::new(4, 4)), 8);
        assert_eq!(Coord::new(3, 1).manhattan(Coord::new(1, 3)), 4);
        assert!(Coord::new(2, 2).is_adjacent(Coord::new(2, 3)));
        assert!(!Coord::new(2, 2).is_adjacent(Coord::new(3, 3)));
        assert!(!Coord::new(i32::MAX, 0).is_adjacent(Coord::new(i32::MIN, 0)));
    }

    #[test]
    fn ordering_is_row_major() {
        let mut v = vec![Coord::new(1, 0), Coord::new(0, 5), Coord::new(0, 1)];
        v.sort();
        assert_eq!(v, vec![Coord::new(0, 1), Coord::new(0, 5), Coord::new(1, 0)]);
    }

    #[test]
    fn parse_coord() {
        assert_eq!("3,4".parse::<Coord>(), Ok(Coord::new(3, 4)));
        assert_eq!("(0, 19)".parse::<Coord>(), Ok(Coord::new(0, 19)));
        assert!("3".parse::<Coord>().is_err());
        assert!("a,b".parse::<Coord>().is_err());
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn coord_json_shape() {
        let json = serde_json::to_string(&Coord::new(2, 7)).unwrap();
        assert_eq!(json, r#"{"row":2,"col":7}"#);
    }
}
