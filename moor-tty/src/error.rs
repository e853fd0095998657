//! Error types for terminal operations.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TtyError {
    #[error("failed to read terminal attributes: {0}")]
    GetAttr(#[source] nix::Error),

    #[error("failed to set terminal attributes: {0}")]
    SetAttr(#[source] nix::Error),

    #[error("failed to query window size: {0}")]
    WindowSize(#[source] nix::Error),

    #[error("failed to poll stdin: {0}")]
    Poll(#[source] nix::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
