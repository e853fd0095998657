//! Popup frames
//!
//! Centered boxes overlaid on whatever frame is on screen. Long messages
//! wrap greedily at the interior width and the box grows downward, keeping
//! the option/input rows pinned relative to the bottom.

use moor_screen::style::sgr;
use moor_screen::{draw_border, draw_horizontal_line, overlay, wrap_greedy, Pane};

/// Which option of a binary choice is active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// Most characters a text-input popup accepts
pub const INPUT_CAP: usize = 64;

const MESSAGE_WIDTH: usize = 32;
const MESSAGE_BASE_HEIGHT: usize = 7;
const CHOICE_WIDTH: usize = 48;
const CHOICE_BASE_HEIGHT: usize = 9;
const CHOICE_TEXT_PADDING: usize = 16;
const INPUT_WIDTH: usize = 48;
const INPUT_BASE_HEIGHT: usize = 10;
const INPUT_BOX_WIDTH: usize = 38;
/// Characters per input-box line; the second line holds the overflow
const INPUT_LINE: usize = 36;

fn centered(width: usize, len: usize) -> usize {
    (width / 2).saturating_sub(len / 2)
}

/// A message box. With `has_ok` the caller waits for Submit; without it
/// the popup is a fire-and-forget progress indicator.
pub fn message_pane(message: &str, has_ok: bool) -> Pane {
    let lines = wrap_greedy(message, MESSAGE_WIDTH - 4);
    let height = MESSAGE_BASE_HEIGHT + lines.len() - 1;
    let mut pane = Pane::new(MESSAGE_WIDTH, height);
    for (i, line) in lines.iter().enumerate() {
        let x = centered(MESSAGE_WIDTH, line.chars().count());
        pane.write_styled(x, 2 + i, line, sgr::POPUP_ACCENT);
    }
    if has_ok {
        pane.write_styled(MESSAGE_WIDTH / 2 - 1, height - 3, "Ok", sgr::SELECTED);
    }
    draw_border(&mut pane.buffer);
    pane
}

/// A two-option box; `selected` renders inverted
pub fn choice_pane(message: &str, left: &str, right: &str, selected: Side) -> Pane {
    let lines = wrap_greedy(message, CHOICE_WIDTH - CHOICE_TEXT_PADDING);
    let height = CHOICE_BASE_HEIGHT + lines.len() - 1;
    let mut pane = Pane::new(CHOICE_WIDTH, height);
    for (i, line) in lines.iter().enumerate() {
        let x = centered(CHOICE_WIDTH, line.chars().count());
        pane.write_styled(x, 2 + i, line, sgr::POPUP_ACCENT);
    }
    draw_horizontal_line(&mut pane.buffer, 0, CHOICE_WIDTH, 3 + lines.len(), '-');

    let half = CHOICE_WIDTH / 4;
    let left_x = half.saturating_sub(left.chars().count() / 2);
    let right_x = CHOICE_WIDTH / 2 + half - right.chars().count() / 2;
    let options_y = height - 3;
    if selected == Side::Left {
        pane.write_styled(left_x, options_y, left, sgr::SELECTED);
    } else {
        pane.write(left_x, options_y, left);
    }
    if selected == Side::Right {
        pane.write_styled(right_x, options_y, right, sgr::SELECTED);
    } else {
        pane.write(right_x, options_y, right);
    }
    draw_border(&mut pane.buffer);
    pane
}

/// A text-entry box. Returns the pane and the cell (relative to the pane)
/// where the terminal cursor belongs.
pub fn input_pane(prompt: &str, content: &str) -> (Pane, (usize, usize)) {
    let lines = wrap_greedy(prompt, INPUT_WIDTH - 4);
    let extra = lines.len() - 1;
    let height = INPUT_BASE_HEIGHT + extra;
    let mut pane = Pane::new(INPUT_WIDTH, height);
    for (i, line) in lines.iter().enumerate() {
        let x = centered(INPUT_WIDTH, line.chars().count());
        pane.write_styled(x, 2 + i, line, sgr::POPUP_ACCENT);
    }
    let info = "press ESC to quit.";
    pane.write_styled(centered(INPUT_WIDTH, info.len()), 3 + extra, info, sgr::HINT);

    let chars: Vec<char> = content.chars().collect();
    let split = chars.len().min(INPUT_LINE);
    let mut input_box = Pane::new(INPUT_BOX_WIDTH, 4);
    let first_line: String = chars[..split].iter().collect();
    input_box.write_overflowing(1, 1, &first_line);
    if chars.len() > INPUT_LINE {
        let second_line: String = chars[INPUT_LINE..].iter().collect();
        input_box.write_overflowing(1, 2, &second_line);
    }
    draw_border(&mut input_box.buffer);

    let box_x = 6;
    let box_y = 4 + extra;
    let box_spans = overlay(&mut pane.buffer, &input_box, box_x, box_y);
    pane.spans.extend(box_spans);
    draw_border(&mut pane.buffer);

    let cursor_x = box_x + 1 + (chars.len() % INPUT_LINE);
    let cursor_y = box_y + 1 + usize::from(chars.len() > INPUT_LINE - 1);
    (pane, (cursor_x, cursor_y))
}
