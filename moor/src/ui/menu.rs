//! Main-menu frame
//!
//! A full-screen list of projects. Projects with pending todos render in
//! the alert color; the selection is inverted; both combine by span
//! overlap.

use moor_screen::style::sgr;
use moor_screen::{draw_horizontal_line, wrap_greedy, Pane};
use moor_store::Project;

pub const HINT: &str =
    "Use arrows to navigate the menu. Press ENTER to open a project, and press 'q' to quit.";

/// Build the menu pane. The caller draws the border and paints.
pub fn build(
    projects: &[Project],
    has_todo: &[bool],
    cursor: usize,
    width: usize,
    height: usize,
) -> Pane {
    let mut pane = Pane::new(width, height);
    pane.write(1, 1, "Projects:");

    let hints = wrap_greedy(HINT, width.saturating_sub(2).max(1));
    for (i, line) in hints.iter().enumerate() {
        pane.write_styled(1, 2 + i, line, sgr::HINT);
    }
    let offset = hints.len() - 1;
    draw_horizontal_line(&mut pane.buffer, 0, width, 3 + offset, '-');

    let first = 4 + offset;
    for (i, project) in projects.iter().enumerate() {
        let y = first + i;
        if y + 1 >= height {
            break;
        }
        let flagged = has_todo.get(i).copied().unwrap_or(false);
        let selected = i == cursor;
        match (flagged, selected) {
            (true, true) => pane.write_styled(1, y, &project.name, sgr::ALERT_SELECTED),
            (true, false) => pane.write_styled(1, y, &project.name, sgr::ALERT),
            (false, true) => pane.write_styled(1, y, &project.name, sgr::SELECTED),
            (false, false) => pane.write(1, y, &project.name),
        }
    }
    pane
}
