//! Panes
//!
//! A pane is an independently rendered rectangle: a buffer plus the style
//! spans written into it. Panes are built fresh each frame and discarded
//! once they have been composed into the root buffer.

use crate::buffer::ScreenBuffer;
use crate::style::StyleSpan;

#[derive(Debug, Clone)]
pub struct Pane {
    pub buffer: ScreenBuffer,
    pub spans: Vec<StyleSpan>,
}

impl Pane {
    /// Create a blank pane with the given dimensions
    pub fn new(width: usize, height: usize) -> Self {
        Pane {
            buffer: ScreenBuffer::new(width, height),
            spans: Vec::new(),
        }
    }

    pub fn width(&self) -> usize {
        self.buffer.width()
    }

    pub fn height(&self) -> usize {
        self.buffer.height()
    }

    /// Write plain text, clipping at the pane boundary
    pub fn write(&mut self, x: usize, y: usize, text: &str) {
        self.buffer.write_text(x, y, text);
    }

    /// Write text and record a style span covering the columns written.
    /// A write that was clipped records a correspondingly shorter span.
    pub fn write_styled(&mut self, x: usize, y: usize, text: &str, code: &'static str) {
        let len = self.buffer.write_text(x, y, text);
        if len > 0 {
            self.spans.push(StyleSpan::new(x, y, len, code));
        }
    }

    /// Write text into a generously pre-sized interior, extending the row
    pub fn write_overflowing(&mut self, x: usize, y: usize, text: &str) {
        self.buffer.write_text_overflowing(x, y, text);
    }

    /// Blank the pane for the next frame without reallocating
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.spans.clear();
    }
}
