//! Pane composition
//!
//! Merges panes into a root buffer: side-by-side splits with a separator
//! column, popup overlays, the outer frame border, and separator lines.

use thiserror::Error;

use crate::buffer::ScreenBuffer;
use crate::pane::Pane;
use crate::style::StyleSpan;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ComposeError {
    #[error("pane row counts differ: left has {left} rows, right has {right}")]
    RowCountMismatch { left: usize, right: usize },
}

/// Merge two panes side by side into `root` with a `|` separator column.
///
/// Every root row becomes `left_row + '|' + right_row`, so the result is
/// exactly `left.width() + right.width() + 1` columns wide. Right-pane
/// style spans are re-offset past the separator. The merged span list is
/// returned in left-then-right order so overlap keeps its paint order.
pub fn combine(
    root: &mut ScreenBuffer,
    left: &Pane,
    right: &Pane,
) -> Result<Vec<StyleSpan>, ComposeError> {
    if left.height() != right.height() {
        return Err(ComposeError::RowCountMismatch {
            left: left.height(),
            right: right.height(),
        });
    }

    let left_width = left.width();
    let height = left.height();
    root.resize(left_width + right.width() + 1, height);

    for y in 0..height {
        let row = root.row_mut(y).expect("root sized above");
        let lrow = left.buffer.row(y).expect("checked height");
        let rrow = right.buffer.row(y).expect("checked height");
        row[..left_width].copy_from_slice(lrow);
        row[left_width] = '|';
        row[left_width + 1..].copy_from_slice(rrow);
    }

    let mut spans = left.spans.clone();
    spans.extend(right.spans.iter().map(|s| s.translated(left_width + 1, 0)));
    Ok(spans)
}

/// Blit a pane into `root` with its top-left corner at `(x, y)`, clipping
/// at the root boundary. Returns the pane's spans translated to root
/// coordinates; the caller appends them after the spans already painted so
/// the overlay wins where they overlap.
pub fn overlay(root: &mut ScreenBuffer, pane: &Pane, x: usize, y: usize) -> Vec<StyleSpan> {
    for row in 0..pane.height() {
        let text: String = pane
            .buffer
            .row(row)
            .expect("row in range")
            .iter()
            .collect();
        root.write_text(x, y + row, &text);
    }
    pane.spans.iter().map(|s| s.translated(x, y)).collect()
}

/// Draw the rectangular frame border: `+` corners, `-` top and bottom,
/// `|` down both edges.
///
/// Must be the last write of the frame; text written afterwards would
/// corrupt the border. That ordering is a contract with the caller, not
/// something this function can enforce.
pub fn draw_border(buffer: &mut ScreenBuffer) {
    let height = buffer.height();
    if height == 0 || buffer.width() < 2 {
        return;
    }
    for y in 0..height {
        let row = match buffer.row_mut(y) {
            Some(row) => row,
            None => continue,
        };
        let last = row.len() - 1;
        if y == 0 || y == height - 1 {
            row.fill('-');
            row[0] = '+';
            row[last] = '+';
        } else {
            row[0] = '|';
            row[last] = '|';
        }
    }
}

/// Draw a horizontal run of `ch` from `x1` to `x2` inclusive on row `y`.
/// Inverted bounds are swapped; the run clips to the row; an out-of-range
/// `y` is a silent no-op (callers use this for decorative separators).
pub fn draw_horizontal_line(buffer: &mut ScreenBuffer, x1: usize, x2: usize, y: usize, ch: char) {
    let (x1, x2) = if x1 > x2 { (x2, x1) } else { (x1, x2) };
    let row = match buffer.row_mut(y) {
        Some(row) if !row.is_empty() => row,
        _ => return,
    };
    for x in x1..=x2.min(row.len() - 1) {
        row[x] = ch;
    }
}
