//! Fixed-size character grid
//!
//! The buffer is a grid of columns-by-rows characters representing one frame.
//! Writes clip at the row boundary and never panic; a separate overflowing
//! write exists for popup interiors that are deliberately pre-sized wide.

use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthChar;

/// Marks the second column of a double-width character. Never rendered.
const CONTINUATION: char = '\0';

/// A grid of character cells, one per terminal column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenBuffer {
    /// Rows of column slots (row 0 is at the top)
    rows: Vec<Vec<char>>,
    /// Number of columns
    width: usize,
    /// Number of rows
    height: usize,
}

impl ScreenBuffer {
    /// Create a blank buffer with the given dimensions
    pub fn new(width: usize, height: usize) -> Self {
        let rows = (0..height).map(|_| vec![' '; width]).collect();
        ScreenBuffer {
            rows,
            width,
            height,
        }
    }

    /// Get the number of columns
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get the number of rows
    pub fn height(&self) -> usize {
        self.height
    }

    /// Replace the grid wholesale with a blank grid of the new dimensions.
    /// Nothing of the old content survives a resize.
    pub fn resize(&mut self, width: usize, height: usize) {
        log::trace!("buffer resize {}x{} -> {}x{}", self.width, self.height, width, height);
        *self = ScreenBuffer::new(width, height);
    }

    /// Reset every cell to a space without reallocating the grid.
    /// Rows previously extended by an overflowing write are trimmed back.
    pub fn clear(&mut self) {
        for row in &mut self.rows {
            row.truncate(self.width);
            row.resize(self.width, ' ');
            row.fill(' ');
        }
    }

    /// Get the column slots of a row
    pub fn row(&self, y: usize) -> Option<&[char]> {
        self.rows.get(y).map(|r| r.as_slice())
    }

    pub(crate) fn row_mut(&mut self, y: usize) -> Option<&mut Vec<char>> {
        self.rows.get_mut(y)
    }

    /// Get the character at a cell, if in bounds
    pub fn cell(&self, x: usize, y: usize) -> Option<char> {
        self.rows.get(y).and_then(|r| r.get(x)).copied()
    }

    /// Render a row as a printable string, skipping continuation slots
    pub fn row_text(&self, y: usize) -> String {
        match self.rows.get(y) {
            Some(row) => row.iter().filter(|&&c| c != CONTINUATION).collect(),
            None => String::new(),
        }
    }

    /// The printable text covered by `len` columns starting at `(x, y)`
    pub fn span_text(&self, x: usize, y: usize, len: usize) -> String {
        match self.rows.get(y) {
            Some(row) => row
                .iter()
                .skip(x)
                .take(len)
                .filter(|&&c| c != CONTINUATION)
                .collect(),
            None => String::new(),
        }
    }

    /// Copy `text` into row `y` starting at column `x`, clipping at the row
    /// boundary. Characters that do not fit are silently dropped.
    /// Returns the number of columns written.
    pub fn write_text(&mut self, x: usize, y: usize, text: &str) -> usize {
        self.write_at(x, y, text, false)
    }

    /// Like [`write_text`](Self::write_text) but extends the row past its
    /// declared width instead of clipping. Only popup interiors that are
    /// pre-sized generously should need this.
    pub fn write_text_overflowing(&mut self, x: usize, y: usize, text: &str) -> usize {
        self.write_at(x, y, text, true)
    }

    fn write_at(&mut self, x: usize, y: usize, text: &str, overflow: bool) -> usize {
        let row = match self.rows.get_mut(y) {
            Some(row) => row,
            None => return 0,
        };

        let mut col = x;
        for ch in text.chars() {
            let w = UnicodeWidthChar::width(ch).unwrap_or(0);
            if w == 0 {
                continue;
            }
            if col + w > row.len() {
                if !overflow {
                    break;
                }
                row.resize(col + w, ' ');
            }
            put(row, col, ch);
            if w == 2 {
                put(row, col + 1, CONTINUATION);
            }
            col += w;
        }
        col.saturating_sub(x)
    }
}

/// Write one slot, repairing a double-width character it may be splitting.
fn put(row: &mut [char], col: usize, ch: char) {
    if row[col] == CONTINUATION && col > 0 {
        row[col - 1] = ' ';
    }
    if col + 1 < row.len()
        && row[col + 1] == CONTINUATION
        && UnicodeWidthChar::width(row[col]).unwrap_or(1) == 2
    {
        row[col + 1] = ' ';
    }
    row[col] = ch;
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_new_buffer_is_blank() {
        let buf = ScreenBuffer::new(10, 4);
        assert_eq!(buf.width(), 10);
        assert_eq!(buf.height(), 4);
        for y in 0..4 {
            assert_eq!(buf.row_text(y), " ".repeat(10));
        }
    }

    #[test]
    fn test_write_text() {
        let mut buf = ScreenBuffer::new(10, 2);
        let n = buf.write_text(2, 1, "hey");
        assert_eq!(n, 3);
        assert_eq!(buf.row_text(1), "  hey     ");
    }

    #[test]
    fn test_write_clips_at_row_boundary() {
        let mut buf = ScreenBuffer::new(5, 1);
        let n = buf.write_text(3, 0, "long");
        assert_eq!(n, 2);
        assert_eq!(buf.row_text(0), "   lo");
        assert_eq!(buf.row(0).unwrap().len(), 5);
    }

    #[test]
    fn test_write_out_of_range_is_noop() {
        let mut buf = ScreenBuffer::new(5, 2);
        assert_eq!(buf.write_text(0, 7, "x"), 0);
        assert_eq!(buf.write_text(9, 0, "x"), 0);
        assert_eq!(buf.row_text(0), "     ");
    }

    #[test]
    fn test_overflowing_write_extends_row() {
        let mut buf = ScreenBuffer::new(5, 1);
        let n = buf.write_text_overflowing(3, 0, "long");
        assert_eq!(n, 4);
        assert_eq!(buf.row_text(0), "   long");
        assert_eq!(buf.row(0).unwrap().len(), 7);
    }

    #[test]
    fn test_clear_resets_and_trims_overflow() {
        let mut buf = ScreenBuffer::new(5, 2);
        buf.write_text_overflowing(0, 0, "overflowed");
        buf.write_text(0, 1, "ab");
        buf.clear();
        assert_eq!(buf.row(0).unwrap().len(), 5);
        assert_eq!(buf.row_text(0), "     ");
        assert_eq!(buf.row_text(1), "     ");
    }

    #[test]
    fn test_resize_replaces_content() {
        let mut buf = ScreenBuffer::new(80, 24);
        buf.write_text(0, 0, "stale");
        buf.resize(120, 40);
        assert_eq!(buf.width(), 120);
        assert_eq!(buf.height(), 40);
        assert_eq!(buf.row_text(0), " ".repeat(120));
    }

    #[test]
    fn test_wide_char_occupies_two_columns() {
        let mut buf = ScreenBuffer::new(6, 1);
        let n = buf.write_text(0, 0, "漢x");
        assert_eq!(n, 3);
        assert_eq!(buf.cell(0, 0), Some('漢'));
        assert_eq!(buf.cell(2, 0), Some('x'));
        // continuation slot is not rendered
        assert_eq!(buf.row_text(0), "漢x   ");
    }

    #[test]
    fn test_wide_char_clipped_when_half_fits() {
        let mut buf = ScreenBuffer::new(3, 1);
        let n = buf.write_text(2, 0, "漢");
        assert_eq!(n, 0);
        assert_eq!(buf.row_text(0), "   ");
    }

    #[test]
    fn test_overwriting_half_of_wide_char_blanks_it() {
        let mut buf = ScreenBuffer::new(6, 1);
        buf.write_text(0, 0, "漢");
        buf.write_text(1, 0, "x");
        assert_eq!(buf.cell(0, 0), Some(' '));
        assert_eq!(buf.cell(1, 0), Some('x'));
    }

    #[test]
    fn test_zero_width_chars_dropped() {
        let mut buf = ScreenBuffer::new(5, 1);
        let n = buf.write_text(0, 0, "a\u{200b}b");
        assert_eq!(n, 2);
        assert_eq!(buf.row_text(0), "ab   ");
    }

    proptest! {
        #[test]
        fn clipped_writes_never_extend_a_row(
            x in 0usize..100,
            y in 0usize..30,
            text in "[ -~]{0,120}",
        ) {
            let mut buf = ScreenBuffer::new(40, 12);
            buf.write_text(x, y, &text);
            for row in 0..buf.height() {
                prop_assert_eq!(buf.row(row).unwrap().len(), 40);
            }
        }

        #[test]
        fn writes_are_recoverable_as_text(
            x in 0usize..30,
            text in "[a-z]{1,10}",
        ) {
            let mut buf = ScreenBuffer::new(40, 1);
            let n = buf.write_text(x, 0, &text);
            prop_assert_eq!(buf.span_text(x, 0, n), text[..n].to_string());
        }
    }
}
