//! The editing state machine behind the visualizer.
//!
//! The grid model only enforces "one start, one goal". How clicks become
//! endpoints, when obstacles may be painted and when the board is frozen
//! after a search is presentation policy, and it lives here.

use gridpath_core::{CellKind, Coord, Grid, GridError};
use gridpath_search::{Path, PathSearch, SearchError, SearchOutcome};
use rand::Rng;

/// Chance that the randomizer turns a cell into an obstacle.
pub const DEFAULT_OBSTACLE_PROBABILITY: f64 = 0.3;

/// What a click on the board does.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    /// Clicks place the start, then the goal.
    #[default]
    PlaceEndpoints,
    /// Clicks and plain hovering toggle obstacles.
    PaintObstacles,
}

/// Board state as seen by the user.
#[derive(Debug, Clone)]
pub struct Editor {
    grid: Grid,
    search: PathSearch,
    mode: Mode,
    path_generated: bool,
    outcome: Option<SearchOutcome>,
}

impl Editor {
    /// A blank `rows` × `cols` board.
    pub fn new(rows: i32, cols: i32) -> Self {
        let grid = Grid::new(rows, cols);
        let search = PathSearch::for_grid(&grid);
        Self {
            grid,
            search,
            mode: Mode::default(),
            path_generated: false,
            outcome: None,
        }
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Whether a search ran since the last refresh. Endpoint clicks are
    /// ignored while this is set.
    #[inline]
    pub fn path_generated(&self) -> bool {
        self.path_generated
    }

    /// Outcome of the last search, if it is still current.
    #[inline]
    pub fn outcome(&self) -> Option<&SearchOutcome> {
        self.outcome.as_ref()
    }

    /// Path found by the last search, if any.
    #[inline]
    pub fn path(&self) -> Option<&Path> {
        self.outcome.as_ref().and_then(SearchOutcome::path)
    }

    /// Cells expanded by the last search.
    #[inline]
    pub fn expanded(&self) -> usize {
        self.search.expanded()
    }

    /// Switch between endpoint placement and obstacle painting.
    pub fn toggle_mode(&mut self) -> Mode {
        self.mode = match self.mode {
            Mode::PlaceEndpoints => Mode::PaintObstacles,
            Mode::PaintObstacles => Mode::PlaceEndpoints,
        };
        log::debug!("editor mode: {:?}", self.mode);
        self.mode
    }

    /// Handle a click on `c`.
    ///
    /// In paint mode the obstacle under the pointer flips, and a stored
    /// outcome is dropped if that cell was an endpoint or on the path.
    /// Otherwise, until
    /// a path has been generated, the first click places the start, the
    /// second the goal, and any further click moves the start to `c` and
    /// clears the goal.
    pub fn click(&mut self, c: Coord) -> Result<(), GridError> {
        if self.mode == Mode::PaintObstacles {
            let on_result = self.grid.kind(c).is_some_and(CellKind::is_endpoint)
                || self.path().is_some_and(|p| p.contains(c));
            self.grid.toggle_obstacle(c)?;
            if on_result {
                self.outcome = None;
            }
            return Ok(());
        }
        if self.path_generated {
            return Ok(());
        }
        match (self.grid.start(), self.grid.goal()) {
            (None, _) => self.grid.set_start(c)?,
            (Some(_), None) => self.grid.set_goal(c)?,
            (Some(_), Some(_)) => {
                if !self.grid.contains(c) {
                    return Err(GridError::OutOfBounds {
                        coord: c,
                        rows: self.grid.rows(),
                        cols: self.grid.cols(),
                    });
                }
                self.grid.clear_goal();
                self.grid.set_start(c)?;
                self.path_generated = false;
            }
        }
        Ok(())
    }

    /// Handle the pointer entering `c`.
    ///
    /// Painting by hover only happens in paint mode, before a search, and
    /// while no mouse button is held.
    pub fn hover(&mut self, c: Coord, button_held: bool) -> Result<(), GridError> {
        if !self.path_generated && self.mode == Mode::PaintObstacles && !button_held {
            self.grid.toggle_obstacle(c)?;
        }
        Ok(())
    }

    /// Re-roll every cell other than the start and goal: each becomes an
    /// obstacle with `probability`, independently, and free otherwise.
    ///
    /// A previously found path is dropped since it may now cross obstacles.
    pub fn randomize_obstacles<R: Rng>(&mut self, rng: &mut R, probability: f64) {
        let probability = probability.clamp(0.0, 1.0);
        self.grid.reroll_obstacles(|_| rng.random_bool(probability));
        self.outcome = None;
        log::debug!(
            "randomized obstacles (p = {probability}): {} of {} cells",
            self.grid.obstacle_count(),
            self.grid.len()
        );
    }

    /// Clear obstacles, endpoints and the last result.
    pub fn refresh(&mut self) {
        self.grid.reset();
        self.outcome = None;
        self.path_generated = false;
    }

    /// Refresh and start over on a board of a new size.
    pub fn regenerate(&mut self, rows: i32, cols: i32) {
        self.refresh();
        self.grid = Grid::new(rows, cols);
        self.search.set_size(rows, cols);
    }

    /// Run the search between the current start and goal.
    ///
    /// Without both endpoints nothing changes and
    /// [`SearchError::MissingEndpoints`] is returned. Otherwise the outcome,
    /// found or not, is kept and the board is marked as searched.
    pub fn generate_path(&mut self) -> Result<&SearchOutcome, SearchError> {
        let outcome = match self
            .search
            .find_path(&self.grid, self.grid.start(), self.grid.goal())
        {
            Ok(outcome) => outcome,
            Err(err) => {
                log::warn!("{err}");
                return Err(err);
            }
        };
        match outcome.path() {
            Some(path) => log::info!(
                "path found: {} cells, {} expanded",
                path.len(),
                self.search.expanded()
            ),
            None => log::info!("no path: goal unreachable"),
        }
        self.path_generated = true;
        Ok(&*self.outcome.insert(outcome))
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(gridpath_core::DEFAULT_ROWS, gridpath_core::DEFAULT_COLS)
    }
}
