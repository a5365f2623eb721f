//! Front-ends for the gridpath A* visualizer.
//!
//! The search engine and grid model know nothing about input or drawing.
//! Everything a user interacts with lives here: the [`editor::Editor`]
//! state machine that turns clicks into grid edits, the obstacle
//! randomizer, the step-by-step [`reveal::RevealSchedule`] for found paths,
//! a text renderer, and the crossterm terminal loop used by the `gridpath`
//! binary.

pub mod app;
pub mod config;
pub mod editor;
pub mod error;
pub mod render;
pub mod reveal;
pub mod term;

pub use app::{App, Control, Input, Key};
pub use config::{Config, ConfigError};
pub use editor::{DEFAULT_OBSTACLE_PROBABILITY, Editor, Mode};
pub use error::DemoError;
pub use render::{Frame, Tint};
pub use reveal::{DEFAULT_REVEAL_STEP, RevealSchedule};
