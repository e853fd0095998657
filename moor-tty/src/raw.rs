//! Raw-mode RAII guard
//!
//! Raw mode is a process-wide toggle on the controlling terminal, and a
//! program that exits without undoing it leaves the user's shell unusable.
//! The guard therefore pairs acquisition with release in `Drop`: every exit
//! path (normal quit, the cd fast-exit, fatal errors, panics unwinding)
//! restores the saved attributes, re-shows the cursor and clears the
//! screen.

use std::io::{self, Write};

use nix::sys::termios::{self, LocalFlags, SetArg, Termios};

use crate::error::TtyError;

/// Holds the terminal in raw (non-canonical, no-echo) mode while alive
pub struct RawMode {
    saved: Termios,
    active: bool,
}

impl RawMode {
    /// Switch the terminal to raw mode and hide the cursor
    pub fn enter() -> Result<Self, TtyError> {
        let saved = termios::tcgetattr(io::stdin()).map_err(TtyError::GetAttr)?;
        let mut guard = RawMode {
            saved,
            active: false,
        };
        guard.apply_raw()?;
        write_now("\x1b[?25l")?;
        log::debug!("terminal switched to raw mode");
        Ok(guard)
    }

    /// Temporarily hand the terminal back in its original mode, e.g. while
    /// an external editor runs. Call [`resume`](Self::resume) afterwards.
    pub fn suspend(&mut self) -> Result<(), TtyError> {
        termios::tcsetattr(io::stdin(), SetArg::TCSANOW, &self.saved)
            .map_err(TtyError::SetAttr)?;
        self.active = false;
        write_now("\x1b[?25h")?;
        log::debug!("terminal handed back for a child process");
        Ok(())
    }

    /// Re-enter raw mode after a suspension
    pub fn resume(&mut self) -> Result<(), TtyError> {
        self.apply_raw()?;
        write_now("\x1b[?25l")?;
        Ok(())
    }

    fn apply_raw(&mut self) -> Result<(), TtyError> {
        let mut raw = self.saved.clone();
        raw.local_flags.remove(LocalFlags::ICANON);
        raw.local_flags.remove(LocalFlags::ECHO);
        termios::tcsetattr(io::stdin(), SetArg::TCSANOW, &raw).map_err(TtyError::SetAttr)?;
        self.active = true;
        Ok(())
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        if self.active {
            let _ = termios::tcsetattr(io::stdin(), SetArg::TCSANOW, &self.saved);
        }
        // leave a clean screen with a visible cursor, whatever the exit path
        let _ = write_now("\x1b[2J\x1b[1;1H\x1b[?25h");
    }
}

fn write_now(seq: &str) -> Result<(), TtyError> {
    let mut out = io::stdout();
    out.write_all(seq.as_bytes())?;
    out.flush()?;
    Ok(())
}
