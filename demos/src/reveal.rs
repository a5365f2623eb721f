//! Timed, cell-by-cell reveal of a found path.

use std::time::Duration;

/// Delay between two consecutive path cells becoming visible.
pub const DEFAULT_REVEAL_STEP: Duration = Duration::from_millis(50);

/// Reveal timing for a path of `len` cells: cell `k` (0 = start) shows up
/// `step * (k + 1)` after the reveal begins.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RevealSchedule {
    len: usize,
    step: Duration,
}

impl RevealSchedule {
    pub fn new(len: usize, step: Duration) -> Self {
        Self { len, step }
    }

    /// Number of cells in the path.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// When cell `k` becomes visible, relative to the reveal start.
    pub fn delay_of(&self, k: usize) -> Duration {
        self.step.saturating_mul(u32::try_from(k + 1).unwrap_or(u32::MAX))
    }

    /// Time until the whole path is visible.
    pub fn total(&self) -> Duration {
        match self.len {
            0 => Duration::ZERO,
            n => self.delay_of(n - 1),
        }
    }

    /// How many leading cells are visible `elapsed` after the reveal began.
    pub fn visible_at(&self, elapsed: Duration) -> usize {
        if self.step.is_zero() {
            return self.len;
        }
        let shown = elapsed.as_nanos() / self.step.as_nanos();
        usize::try_from(shown).map_or(self.len, |n| n.min(self.len))
    }

    /// Whether every cell is visible at `elapsed`.
    pub fn is_complete(&self, elapsed: Duration) -> bool {
        self.visible_at(elapsed) == self.len
    }
}

impl Default for RevealSchedule {
    fn default() -> Self {
        Self::new(0, DEFAULT_REVEAL_STEP)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn cells_appear_one_step_apart() {
        let s = RevealSchedule::new(4, DEFAULT_REVEAL_STEP);
        assert_eq!(s.delay_of(0), MS * 50);
        assert_eq!(s.delay_of(3), MS * 200);
        assert_eq!(s.total(), MS * 200);

        assert_eq!(s.visible_at(Duration::ZERO), 0);
        assert_eq!(s.visible_at(MS * 49), 0);
        assert_eq!(s.visible_at(MS * 50), 1);
        assert_eq!(s.visible_at(MS * 149), 2);
        assert_eq!(s.visible_at(MS * 200), 4);
        assert_eq!(s.visible_at(MS * 10_000), 4);
        assert!(!s.is_complete(MS * 199));
        assert!(s.is_complete(MS * 200));
    }

    #[test]
    fn zero_step_shows_everything() {
        let s = RevealSchedule::new(9, Duration::ZERO);
        assert_eq!(s.visible_at(Duration::ZERO), 9);
        assert_eq!(s.total(), Duration::ZERO);
    }

    #[test]
    fn empty_schedule() {
        let s = RevealSchedule::default();
        assert!(s.is_empty());
        assert_eq!(s.total(), Duration::ZERO);
        assert!(s.is_complete(Duration::ZERO));
    }
}
