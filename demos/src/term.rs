//! Crossterm terminal front-end.
//!
//! Each board cell is drawn two columns wide so the grid looks square. The
//! title sits on the first line, the board below it, and the status and
//! help lines after the board.

use std::io::{self, Write};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEventKind},
    execute, queue,
    style::{self, Attribute, Color, Print, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use gridpath_core::Coord;

use crate::app::{HELP, Input, Key};
use crate::render::{Frame, Tint};

/// Screen line of the first board row.
const BOARD_TOP: u16 = 1;
/// Screen columns per board cell.
const CELL_WIDTH: u16 = 2;

/// Foreground and background colours of a tint.
fn tint_colors(t: Tint) -> (Color, Color) {
    match t {
        Tint::Free => (Color::DarkGrey, Color::Reset),
        Tint::Obstacle => (Color::Black, Color::Grey),
        Tint::Start => (Color::Black, Color::Green),
        Tint::Goal => (Color::Black, Color::Red),
        Tint::Path => (Color::Black, Color::Cyan),
    }
}

/// Maps a crossterm [`KeyCode`] to a visualizer [`Key`].
fn to_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Char(c) => Some(Key::Char(c.to_ascii_lowercase())),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Esc => Some(Key::Escape),
        KeyCode::Up => Some(Key::ArrowUp),
        KeyCode::Down => Some(Key::ArrowDown),
        KeyCode::Left => Some(Key::ArrowLeft),
        KeyCode::Right => Some(Key::ArrowRight),
        _ => None,
    }
}

/// Board cell under screen position (`column`, `row`), if any.
pub fn screen_to_cell(column: u16, row: u16, rows: i32, cols: i32) -> Option<Coord> {
    let r = i32::from(row) - i32::from(BOARD_TOP);
    let c = i32::from(column / CELL_WIDTH);
    (r >= 0 && r < rows && c < cols).then(|| Coord::new(r, c))
}

/// Raw-mode terminal session. Restores the terminal on drop.
pub struct Terminal {
    mouse_enabled: bool,
    active: bool,
}

impl Terminal {
    /// Create a new, not yet initialised terminal.
    pub fn new() -> Self {
        Self {
            mouse_enabled: true,
            active: false,
        }
    }

    /// Configure whether mouse events are captured. Must be set before
    /// [`init`](Terminal::init).
    pub fn with_mouse(mut self, enabled: bool) -> Self {
        self.mouse_enabled = enabled;
        self
    }

    /// Enter raw mode and the alternate screen.
    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        self.active = true;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All)
        )?;
        if self.mouse_enabled {
            execute!(stdout, event::EnableMouseCapture)?;
        }
        Ok(())
    }

    /// Wait up to `timeout` for the next relevant input on a `rows` × `cols`
    /// board.
    pub fn poll(&mut self, timeout: Duration, rows: i32, cols: i32) -> io::Result<Option<Input>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }

        let input = match event::read()? {
            Event::Key(KeyEvent { code, kind, .. }) if kind != KeyEventKind::Release => {
                to_key(code).map(Input::Key)
            }
            Event::Mouse(me) => {
                let Some(cell) = screen_to_cell(me.column, me.row, rows, cols) else {
                    return Ok(None);
                };
                match me.kind {
                    MouseEventKind::Down(MouseButton::Left) => Some(Input::Click(cell)),
                    MouseEventKind::Moved => Some(Input::Hover {
                        cell,
                        button_held: false,
                    }),
                    MouseEventKind::Drag(_) => Some(Input::Hover {
                        cell,
                        button_held: true,
                    }),
                    _ => None,
                }
            }
            _ => None,
        };
        Ok(input)
    }

    /// Draw a full frame.
    pub fn draw(&mut self, frame: &Frame) -> io::Result<()> {
        let mut stdout = io::stdout();
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            terminal::Clear(ClearType::CurrentLine),
            style::SetAttribute(Attribute::Bold),
            Print("gridpath: A* search"),
            style::SetAttribute(Attribute::Reset)
        )?;

        for (y, row) in frame.cells.iter().enumerate() {
            queue!(stdout, cursor::MoveTo(0, BOARD_TOP + y as u16))?;
            for (x, &tint) in row.iter().enumerate() {
                let (fg, bg) = tint_colors(tint);
                let here = Coord::new(y as i32, x as i32);
                if frame.cursor == Some(here) {
                    queue!(stdout, style::SetAttribute(Attribute::Reverse))?;
                }
                queue!(
                    stdout,
                    SetForegroundColor(fg),
                    SetBackgroundColor(bg),
                    Print(tint.glyph()),
                    Print(' '),
                    style::SetAttribute(Attribute::Reset),
                    style::ResetColor
                )?;
            }
        }

        let below = BOARD_TOP + frame.cells.len() as u16;
        queue!(
            stdout,
            cursor::MoveTo(0, below),
            terminal::Clear(ClearType::CurrentLine),
            Print(&frame.status),
            cursor::MoveTo(0, below + 1),
            terminal::Clear(ClearType::CurrentLine),
            SetForegroundColor(Color::DarkGrey),
            Print(HELP),
            style::ResetColor
        )?;
        stdout.flush()
    }

    /// Restore the terminal.
    pub fn close(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        let mut stdout = io::stdout();
        if self.mouse_enabled {
            let _ = execute!(stdout, event::DisableMouseCapture);
        }
        let _ = execute!(stdout, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

impl Default for Terminal {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        self.close();
    }
}
