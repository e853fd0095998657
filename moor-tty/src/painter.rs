//! Frame painter
//!
//! Paints a composed frame: cursor home, every row top to bottom, then the
//! style spans in order. Each span is a cursor jump, the attribute code,
//! the covered text re-read from the buffer, and a reset. Painting spans
//! last and in order is what makes overlapping spans resolve to
//! "last wins".

use std::io::{self, Write};

use moor_screen::{ScreenBuffer, StyleSpan, RESET};

/// Writes frames to stdout
pub struct Painter {
    out: io::Stdout,
}

impl Default for Painter {
    fn default() -> Self {
        Self::new()
    }
}

impl Painter {
    pub fn new() -> Self {
        Painter { out: io::stdout() }
    }

    /// Paint one full frame
    pub fn paint(&mut self, buffer: &ScreenBuffer, spans: &[StyleSpan]) -> io::Result<()> {
        let mut out = self.out.lock();
        let mut frame = String::with_capacity(buffer.width() * buffer.height() + 64);
        frame.push_str("\x1b[1;1H");
        // rows are exactly terminal-width, so the terminal's own wrapping
        // lines them up without explicit newlines
        for y in 0..buffer.height() {
            frame.push_str(&buffer.row_text(y));
        }
        for span in spans {
            let text = buffer.span_text(span.x, span.y, span.len);
            if text.is_empty() {
                continue;
            }
            frame.push_str(&format!(
                "\x1b[{};{}H{}{}{}",
                span.y + 1,
                span.x + 1,
                span.code,
                text,
                RESET
            ));
        }
        out.write_all(frame.as_bytes())?;
        out.flush()
    }

    /// Erase the screen and home the cursor
    pub fn clear(&mut self) -> io::Result<()> {
        self.write_now("\x1b[2J\x1b[1;1H")
    }

    /// Park the terminal cursor at a zero-based cell (used by text input)
    pub fn place_cursor(&mut self, x: usize, y: usize) -> io::Result<()> {
        self.write_now(&format!("\x1b[{};{}H", y + 1, x + 1))
    }

    /// Toggle terminal cursor visibility
    pub fn set_cursor_visible(&mut self, visible: bool) -> io::Result<()> {
        self.write_now(if visible { "\x1b[?25h" } else { "\x1b[?25l" })
    }

    fn write_now(&mut self, seq: &str) -> io::Result<()> {
        let mut out = self.out.lock();
        out.write_all(seq.as_bytes())?;
        out.flush()
    }
}
