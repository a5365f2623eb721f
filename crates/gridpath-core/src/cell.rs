//! The [`CellKind`] type — the role a single grid cell plays.

/// Role of a grid cell. Exactly one holds at any time.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellKind {
    #[default]
    Free,
    Obstacle,
    Start,
    Goal,
}

impl CellKind {
    /// Whether a path may go through a cell of this kind.
    #[inline]
    pub const fn is_passable(self) -> bool {
        !matches!(self, CellKind::Obstacle)
    }

    /// Whether this is the start or goal marker.
    #[inline]
    pub const fn is_endpoint(self) -> bool {
        matches!(self, CellKind::Start | CellKind::Goal)
    }

    /// Glyph used by the text snapshot format.
    #[inline]
    pub const fn glyph(self) -> char {
        match self {
            CellKind::Free => '.',
            CellKind::Obstacle => '#',
            CellKind::Start => 'S',
            CellKind::Goal => 'G',
        }
    }

    /// Inverse of [`glyph`](CellKind::glyph).
    pub const fn from_glyph(ch: char) -> Option<Self> {
        match ch {
            '.' => Some(CellKind::Free),
            '#' => Some(CellKind::Obstacle),
            'S' => Some(CellKind::Start),
            'G' => Some(CellKind::Goal),
            _ => None,
        }
    }
}
