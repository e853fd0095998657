//! Frame builders
//!
//! Pure functions from state to panes. Nothing in here reads input,
//! touches collaborators or writes to the terminal, which is what lets the
//! frame tests assert layout without a TTY.

pub mod menu;
pub mod popup;
pub mod project;
