//! Command-line configuration.

use std::time::Duration;

use clap::Parser;
use gridpath_core::{Coord, DEFAULT_COLS, DEFAULT_ROWS};
use thiserror::Error;

use crate::editor::DEFAULT_OBSTACLE_PROBABILITY;
use crate::reveal::DEFAULT_REVEAL_STEP;

/// Largest grid side accepted; larger grids do not fit a terminal.
pub const MAX_SIDE: i32 = 200;

/// Errors found while validating a [`Config`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("grid size must be between 1x1 and {max}x{max}, got {rows}x{cols}", max = MAX_SIDE)]
    Dimensions { rows: i32, cols: i32 },

    #[error("obstacle density must be within [0, 1], got {0}")]
    Density(f64),

    #[error("{name} {coord} is outside the {rows}x{cols} grid")]
    Endpoint {
        name: &'static str,
        coord: Coord,
        rows: i32,
        cols: i32,
    },

    #[error("start and goal must differ, both are {0}")]
    SameEndpoints(Coord),
}

/// Grid-based A* search visualizer.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "gridpath", version, about)]
pub struct Config {
    /// Number of grid rows.
    #[arg(long, default_value_t = DEFAULT_ROWS)]
    pub rows: i32,

    /// Number of grid columns.
    #[arg(long, default_value_t = DEFAULT_COLS)]
    pub cols: i32,

    /// Probability that the randomizer turns a cell into an obstacle.
    #[arg(long, default_value_t = DEFAULT_OBSTACLE_PROBABILITY)]
    pub density: f64,

    /// Seed for the obstacle randomizer. A random seed is drawn and logged
    /// when omitted.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Delay in milliseconds between revealing consecutive path cells.
    #[arg(long, default_value_t = DEFAULT_REVEAL_STEP.as_millis() as u64)]
    pub reveal_ms: u64,

    /// Print a single randomized search result instead of starting the
    /// interactive terminal.
    #[arg(long)]
    pub headless: bool,

    /// Leave the mouse to the terminal; drive the board with the keyboard.
    #[arg(long)]
    pub no_mouse: bool,

    /// Start cell as "row,col" (headless mode; defaults to the top-left).
    #[arg(long)]
    pub start: Option<Coord>,

    /// Goal cell as "row,col" (headless mode; defaults to the bottom-right).
    #[arg(long)]
    pub goal: Option<Coord>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            density: DEFAULT_OBSTACLE_PROBABILITY,
            seed: None,
            reveal_ms: DEFAULT_REVEAL_STEP.as_millis() as u64,
            headless: false,
            no_mouse: false,
            start: None,
            goal: None,
        }
    }
}

impl Config {
    /// Check value ranges that clap cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let side = 1..=MAX_SIDE;
        if !side.contains(&self.rows) || !side.contains(&self.cols) {
            return Err(ConfigError::Dimensions {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if !(0.0..=1.0).contains(&self.density) {
            return Err(ConfigError::Density(self.density));
        }
        for (name, coord) in [("start", self.start), ("goal", self.goal)] {
            let Some(coord) = coord else { continue };
            if coord.row < 0 || coord.row >= self.rows || coord.col < 0 || coord.col >= self.cols {
                return Err(ConfigError::Endpoint {
                    name,
                    coord,
                    rows: self.rows,
                    cols: self.cols,
                });
            }
        }
        let (start, goal) = self.endpoints();
        if start == goal {
            return Err(ConfigError::SameEndpoints(start));
        }
        Ok(())
    }

    /// Headless endpoints, falling back to opposite corners.
    pub fn endpoints(&self) -> (Coord, Coord) {
        (
            self.start.unwrap_or(Coord::ZERO),
            self.goal
                .unwrap_or_else(|| Coord::new(self.rows - 1, self.cols - 1)),
        )
    }

    /// Delay between revealing consecutive path cells.
    pub fn reveal_step(&self) -> Duration {
        Duration::from_millis(self.reveal_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Config {
        Config::try_parse_from(std::iter::once("gridpath").chain(args.iter().copied()))
            .expect("arguments parse")
    }

    #[test]
    fn defaults_match_visualizer() {
        let cfg = parse(&[]);
        assert_eq!(cfg, Config::default());
        assert_eq!((cfg.rows, cfg.cols), (20, 20));
        assert_eq!(cfg.density, 0.3);
        assert_eq!(cfg.reveal_step(), Duration::from_millis(50));
        assert_eq!(cfg.endpoints(), (Coord::new(0, 0), Coord::new(19, 19)));
        assert_eq!(cfg.validate(), Ok(()));
    }

    #[test]
    fn parses_endpoints_and_seed() {
        let cfg = parse(&[
            "--headless",
            "--rows",
            "5",
            "--cols",
            "8",
            "--seed",
            "7",
            "--start",
            "1,2",
            "--goal",
            "4,7",
        ]);
        assert!(cfg.headless);
        assert!(!cfg.no_mouse);
        assert_eq!(cfg.seed, Some(7));
        assert_eq!(cfg.endpoints(), (Coord::new(1, 2), Coord::new(4, 7)));
        assert_eq!(cfg.validate(), Ok(()));
    }

    #[test]
    fn mouse_capture_can_be_disabled() {
        let cfg = parse(&["--no-mouse"]);
        assert!(cfg.no_mouse);
        assert_eq!(cfg.validate(), Ok(()));
    }

    #[test]
    fn rejects_bad_coordinates_at_parse_time() {
        let res = Config::try_parse_from(["gridpath", "--start", "nope"]);
        assert!(res.is_err());
    }

    #[test]
    fn validation_errors() {
        let cfg = Config {
            rows: 0,
            ..Config::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::Dimensions { .. })));

        let cfg = Config {
            density: 1.5,
            ..Config::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::Density(1.5)));

        let cfg = Config {
            goal: Some(Coord::new(20, 0)),
            ..Config::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::Endpoint { name: "goal", .. })
        ));

        let cfg = Config {
            rows: 1,
            cols: 1,
            ..Config::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::SameEndpoints(Coord::ZERO)));
    }
}
