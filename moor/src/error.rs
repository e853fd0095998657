//! Application error type.

use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Store(#[from] moor_store::StoreError),

    #[error(transparent)]
    Tty(#[from] moor_tty::TtyError),

    #[error(transparent)]
    Input(#[from] moor_input::InputError),

    #[error(transparent)]
    Compose(#[from] moor_screen::ComposeError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
