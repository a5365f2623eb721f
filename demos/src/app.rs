//! Interactive session state: maps user input onto the [`Editor`] and keeps
//! track of the path reveal animation.

use std::time::{Duration, Instant};

use gridpath_core::Coord;
use rand::rngs::StdRng;

use crate::config::Config;
use crate::editor::Editor;
use crate::render::Frame;
use crate::reveal::RevealSchedule;

/// Keys the visualizer reacts to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
}

/// Front-end independent input, already translated to board coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Input {
    /// Main button pressed over a cell.
    Click(Coord),
    /// Pointer moved over a cell.
    Hover { cell: Coord, button_held: bool },
    Key(Key),
}

/// Whether the event loop should keep going.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

pub const HELP: &str =
    "click/x: place  p: paint mode  r: random obstacles  c: clear  n: new grid  enter: search  q: quit";

/// One interactive session.
#[derive(Debug)]
pub struct App {
    editor: Editor,
    rng: StdRng,
    rows: i32,
    cols: i32,
    density: f64,
    step: Duration,
    cursor: Coord,
    last_hover: Option<Coord>,
    reveal: Option<(RevealSchedule, Instant)>,
}

impl App {
    pub fn new(config: &Config, rng: StdRng) -> Self {
        Self {
            editor: Editor::new(config.rows, config.cols),
            rng,
            rows: config.rows,
            cols: config.cols,
            density: config.density,
            step: config.reveal_step(),
            cursor: Coord::ZERO,
            last_hover: None,
            reveal: None,
        }
    }

    #[inline]
    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    #[inline]
    pub fn cursor(&self) -> Coord {
        self.cursor
    }

    /// Apply one input event.
    pub fn handle(&mut self, input: Input, now: Instant) -> Control {
        match input {
            Input::Click(c) => {
                self.cursor = c;
                self.click(c);
            }
            Input::Hover { cell, button_held } => {
                // Terminals report motion per column; act once per cell.
                if self.last_hover == Some(cell) {
                    return Control::Continue;
                }
                self.last_hover = Some(cell);
                if let Err(e) = self.editor.hover(cell, button_held) {
                    log::debug!("hover ignored: {e}");
                }
            }
            Input::Key(key) => return self.key(key, now),
        }
        Control::Continue
    }

    /// Number of path cells visible at `now`.
    pub fn revealed(&self, now: Instant) -> usize {
        match &self.reveal {
            Some((schedule, started)) => schedule.visible_at(now.saturating_duration_since(*started)),
            None => 0,
        }
    }

    /// Whether the reveal animation still has cells to show.
    pub fn animating(&self, now: Instant) -> bool {
        self.reveal
            .as_ref()
            .is_some_and(|(s, started)| !s.is_complete(now.saturating_duration_since(*started)))
    }

    /// Snapshot for drawing.
    pub fn frame(&self, now: Instant) -> Frame {
        Frame::new(&self.editor, self.revealed(now), Some(self.cursor))
    }

    fn key(&mut self, key: Key, now: Instant) -> Control {
        match key {
            Key::Char('q') | Key::Escape => return Control::Quit,
            Key::Char('p') => {
                self.editor.toggle_mode();
            }
            Key::Char('r') => {
                self.editor.randomize_obstacles(&mut self.rng, self.density);
                self.reveal = None;
            }
            Key::Char('c') => {
                self.editor.refresh();
                self.reveal = None;
            }
            Key::Char('n') => {
                self.editor.regenerate(self.rows, self.cols);
                self.cursor = Coord::ZERO;
                self.reveal = None;
            }
            Key::Enter | Key::Char(' ') => self.search(now),
            Key::Char('x') => self.click(self.cursor),
            Key::ArrowUp => self.move_cursor(-1, 0),
            Key::ArrowDown => self.move_cursor(1, 0),
            Key::ArrowLeft => self.move_cursor(0, -1),
            Key::ArrowRight => self.move_cursor(0, 1),
            Key::Char(_) => {}
        }
        Control::Continue
    }

    fn click(&mut self, c: Coord) {
        if let Err(e) = self.editor.click(c) {
            log::debug!("click ignored: {e}");
        }
    }

    fn search(&mut self, now: Instant) {
        self.reveal = match self.editor.generate_path() {
            Ok(outcome) => outcome
                .path()
                .map(|p| (RevealSchedule::new(p.len(), self.step), now)),
            Err(_) => None,
        };
    }

    fn move_cursor(&mut self, drow: i32, dcol: i32) {
        let next = self.cursor.shift(drow, dcol);
        if self.editor.grid().contains(next) {
            self.cursor = next;
        }
    }
}
