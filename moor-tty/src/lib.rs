//! Moor TTY Layer
//!
//! Everything that touches the controlling terminal lives here:
//! - Raw-mode RAII guard (canonical mode and echo off, restored on drop)
//! - Window-size ioctl
//! - Frame painter: rows first, then style spans with attribute/reset codes
//! - Blocking/polling stdin byte source for the input decoder
//!
//! The rest of the workspace never writes an escape code to the terminal
//! directly.

pub mod error;
pub mod input;
pub mod painter;
pub mod raw;
pub mod size;

pub use error::TtyError;
pub use input::TtyInput;
pub use painter::Painter;
pub use raw::RawMode;
pub use size::window_size;
