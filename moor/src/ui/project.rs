//! Project-detail frame
//!
//! Two panes merged side by side: the file tree on the left, the todo list
//! with the git status section on the right. The geometry helpers are the
//! single source of truth for how many list rows fit; the state machine
//! uses them to compute scroll windows before calling [`build`].

use moor_screen::style::sgr;
use moor_screen::{draw_horizontal_line, wrap_greedy, Pane};
use moor_store::Todo;

use crate::app::Focus;

pub const TREE_HINT: &str =
    "Navigate using the arrow keys. Press ENTER over a file you wish to edit, and 'q' to quit.";
pub const TODO_HINT: &str =
    "When focusing this section press 'a' to add a todo entry and ENTER to remove an entry.";

/// Rows of the git status section shown before the ellipsis
const STATUS_ROWS: usize = 6;

/// Everything the frame shows, borrowed from the state machine
pub struct ProjectView<'a> {
    pub name: &'a str,
    /// Tree entries as display-relative paths
    pub entries: &'a [String],
    pub focus: Focus,
    /// `-1` selects the project root row
    pub tree_cursor: isize,
    pub tree_scroll: usize,
    pub todos: &'a [Todo],
    pub todo_cursor: usize,
    pub todo_scroll: usize,
    pub status: &'a [String],
}

pub fn left_width(width: usize) -> usize {
    width.saturating_sub(width / 2 + 1)
}

pub fn right_width(width: usize) -> usize {
    width / 2
}

fn left_hint_lines(width: usize) -> usize {
    wrap_greedy(TREE_HINT, left_width(width).saturating_sub(1).max(1)).len()
}

fn right_hint_lines(width: usize) -> usize {
    wrap_greedy(TODO_HINT, right_width(width).saturating_sub(2).max(1)).len()
}

/// How many tree entries fit below the project-root row
pub fn tree_visible(width: usize, height: usize) -> usize {
    height.saturating_sub(left_hint_lines(width) + 5)
}

/// How many todo rows fit above the git status section
pub fn todo_visible(width: usize, height: usize) -> usize {
    height.saturating_sub(right_hint_lines(width) + 13)
}

/// Build the left and right panes for one frame
pub fn build(view: &ProjectView<'_>, width: usize, height: usize) -> (Pane, Pane) {
    (build_left(view, width, height), build_right(view, width, height))
}

fn build_left(view: &ProjectView<'_>, width: usize, height: usize) -> Pane {
    let lw = left_width(width);
    let mut pane = Pane::new(lw, height);
    let title_style = if view.focus == Focus::Tree {
        sgr::BOLD_FOCUSED
    } else {
        sgr::BOLD
    };
    pane.write_styled(1, 1, "Project Tree", title_style);

    let hints = wrap_greedy(TREE_HINT, lw.saturating_sub(1).max(1));
    for (i, line) in hints.iter().enumerate() {
        pane.write_styled(1, 2 + i, line, sgr::HINT);
    }
    let offset = hints.len() - 1;
    draw_horizontal_line(&mut pane.buffer, 0, lw, 3 + offset, '-');

    let root_style = if view.tree_cursor == -1 && view.focus == Focus::Tree {
        sgr::ROOT_SELECTED
    } else {
        sgr::ALERT
    };
    pane.write_styled(1, 4 + offset, view.name, root_style);

    let first = 5 + offset;
    let visible = tree_visible(width, height);
    for (i, entry) in view
        .entries
        .iter()
        .skip(view.tree_scroll)
        .take(visible)
        .enumerate()
    {
        let index = view.tree_scroll + i;
        let y = first + i;
        if view.focus == Focus::Tree && index as isize == view.tree_cursor {
            pane.write_styled(1, y, entry, sgr::SELECTED);
        } else {
            pane.write(1, y, entry);
        }
    }
    pane
}

fn build_right(view: &ProjectView<'_>, width: usize, height: usize) -> Pane {
    let rw = right_width(width);
    let mut pane = Pane::new(rw, height);
    let title_style = if view.focus == Focus::Todos {
        sgr::BOLD_FOCUSED
    } else {
        sgr::BOLD
    };
    pane.write_styled(1, 1, "Todo List", title_style);

    let hints = wrap_greedy(TODO_HINT, rw.saturating_sub(2).max(1));
    for (i, line) in hints.iter().enumerate() {
        pane.write_styled(1, 2 + i, line, sgr::HINT);
    }
    let offset = hints.len() - 1;
    draw_horizontal_line(&mut pane.buffer, 0, rw, 3 + offset, '-');

    let first = 4 + offset;
    let visible = todo_visible(width, height);
    for (i, todo) in view
        .todos
        .iter()
        .skip(view.todo_scroll)
        .take(visible)
        .enumerate()
    {
        let index = view.todo_scroll + i;
        let y = first + i;
        if view.focus == Focus::Todos && index == view.todo_cursor {
            pane.write_styled(1, y, &todo.text, sgr::SELECTED);
        } else {
            pane.write(1, y, &todo.text);
        }
    }

    // git status section, pinned to the bottom
    pane.write_styled(1, height.saturating_sub(10), "Git status", sgr::BOLD);
    draw_horizontal_line(&mut pane.buffer, 1, rw, height.saturating_sub(9), '-');
    for (i, line) in view.status.iter().enumerate() {
        let y = height.saturating_sub(8) + i;
        if i == STATUS_ROWS {
            pane.write(1, y, "...");
            break;
        }
        pane.write(1, y, line);
    }
    pane
}
