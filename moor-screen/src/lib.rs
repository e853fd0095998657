//! Moor Screen Model
//!
//! This crate provides the platform-independent rendering model:
//! - Fixed-size character grid with clipped writes
//! - Style spans layered over the grid as metadata
//! - Pane composition: side-by-side merging, overlays, borders
//! - Sticky scroll-window computation
//! - Deterministic frame snapshots for testing
//!
//! This crate has NO terminal dependencies and can be used headlessly.

pub mod buffer;
pub mod compose;
pub mod pane;
pub mod scroll;
pub mod snapshot;
pub mod style;
pub mod wrap;

pub use buffer::ScreenBuffer;
pub use compose::{combine, draw_border, draw_horizontal_line, overlay, ComposeError};
pub use pane::Pane;
pub use scroll::scroll_start;
pub use snapshot::Snapshot;
pub use style::{StyleSpan, RESET};
pub use wrap::wrap_greedy;
