//! Frame snapshots
//!
//! A snapshot is a serializable copy of one composed frame (row text plus
//! the ordered span list), used by golden tests and headless debugging.

use serde::{Deserialize, Serialize};

use crate::buffer::ScreenBuffer;
use crate::style::StyleSpan;

/// One styled run, with the code owned so snapshots round-trip
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpanRecord {
    pub x: usize,
    pub y: usize,
    pub len: usize,
    pub code: String,
}

/// A captured frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub width: usize,
    pub height: usize,
    pub rows: Vec<String>,
    pub spans: Vec<SpanRecord>,
}

impl Snapshot {
    /// Capture the current state of a composed frame
    pub fn capture(buffer: &ScreenBuffer, spans: &[StyleSpan]) -> Self {
        Snapshot {
            width: buffer.width(),
            height: buffer.height(),
            rows: (0..buffer.height()).map(|y| buffer.row_text(y)).collect(),
            spans: spans
                .iter()
                .map(|s| SpanRecord {
                    x: s.x,
                    y: s.y,
                    len: s.len,
                    code: s.code.to_string(),
                })
                .collect(),
        }
    }

    /// The frame as plain text, one line per row, trailing blanks trimmed
    pub fn text(&self) -> String {
        self.rows
            .iter()
            .map(|r| r.trim_end())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// The codes applied at a cell, in paint order (the last one wins)
    pub fn codes_at(&self, x: usize, y: usize) -> Vec<&str> {
        self.spans
            .iter()
            .filter(|s| s.y == y && x >= s.x && x < s.x + s.len)
            .map(|s| s.code.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pane::Pane;
    use crate::style::sgr;

    fn sample() -> Snapshot {
        let mut pane = Pane::new(8, 2);
        pane.write(0, 0, "plain");
        pane.write_styled(0, 1, "styled", sgr::ALERT);
        pane.write_styled(0, 1, "sty", sgr::SELECTED);
        Snapshot::capture(&pane.buffer, &pane.spans)
    }

    #[test]
    fn test_text_trims_trailing_blanks() {
        assert_eq!(sample().text(), "plain\nstyled");
    }

    #[test]
    fn test_codes_at_preserves_paint_order() {
        let snap = sample();
        assert_eq!(snap.codes_at(1, 1), vec![sgr::ALERT, sgr::SELECTED]);
        assert_eq!(snap.codes_at(4, 1), vec![sgr::ALERT]);
        assert!(snap.codes_at(0, 0).is_empty());
    }

    #[test]
    fn test_json_round_trip() {
        let snap = sample();
        let json = serde_json::to_string(&snap).unwrap();
        let back: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snap);
    }
}
