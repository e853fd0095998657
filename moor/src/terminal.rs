//! Terminal seam
//!
//! The state machine talks to the terminal through this trait so the
//! integration tests can capture frames and fake resizes. The production
//! implementation wires the moor-tty raw-mode guard and painter together;
//! because it holds the guard, dropping it on any exit path restores the
//! user's terminal.

use std::io;

use moor_screen::{ScreenBuffer, StyleSpan};
use moor_tty::{window_size, Painter, RawMode, TtyError};

pub trait Terminal {
    /// Current dimensions as `(columns, rows)`, polled once per frame
    fn size(&mut self) -> Result<(usize, usize), TtyError>;

    /// Paint one composed frame
    fn paint(&mut self, buffer: &ScreenBuffer, spans: &[StyleSpan]) -> io::Result<()>;

    /// Erase the screen (entering a screen, after resize, after resume)
    fn clear(&mut self) -> io::Result<()>;

    /// Park the terminal cursor at a cell (text-input popup)
    fn place_cursor(&mut self, x: usize, y: usize) -> io::Result<()>;

    fn set_cursor_visible(&mut self, visible: bool) -> io::Result<()>;

    /// Hand the terminal back to a child process in its original mode
    fn suspend(&mut self) -> Result<(), TtyError>;

    /// Take the terminal back after a suspension
    fn resume(&mut self) -> Result<(), TtyError>;
}

/// The real terminal: raw mode held for the lifetime of the value
pub struct VtTerminal {
    raw: RawMode,
    painter: Painter,
}

impl VtTerminal {
    pub fn new() -> Result<Self, TtyError> {
        Ok(VtTerminal {
            raw: RawMode::enter()?,
            painter: Painter::new(),
        })
    }
}

impl Terminal for VtTerminal {
    fn size(&mut self) -> Result<(usize, usize), TtyError> {
        window_size()
    }

    fn paint(&mut self, buffer: &ScreenBuffer, spans: &[StyleSpan]) -> io::Result<()> {
        self.painter.paint(buffer, spans)
    }

    fn clear(&mut self) -> io::Result<()> {
        self.painter.clear()
    }

    fn place_cursor(&mut self, x: usize, y: usize) -> io::Result<()> {
        self.painter.place_cursor(x, y)
    }

    fn set_cursor_visible(&mut self, visible: bool) -> io::Result<()> {
        self.painter.set_cursor_visible(visible)
    }

    fn suspend(&mut self) -> Result<(), TtyError> {
        self.raw.suspend()
    }

    fn resume(&mut self) -> Result<(), TtyError> {
        self.raw.resume()?;
        self.painter.clear()?;
        Ok(())
    }
}
