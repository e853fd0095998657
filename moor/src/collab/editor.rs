//! Editor launcher
//!
//! Runs the configured editor on a path and blocks until it exits. The
//! caller is responsible for suspending the UI around the call.

use std::io;
use std::path::Path;
use std::process::Command;

pub trait EditorLauncher {
    /// Open `path` in the editor, blocking until the process exits
    fn edit(&mut self, path: &Path) -> io::Result<()>;
}

/// Launches the editor as a child on the inherited terminal
#[derive(Debug)]
pub struct CommandEditor {
    command: String,
}

impl CommandEditor {
    pub fn new(command: impl Into<String>) -> Self {
        CommandEditor {
            command: command.into(),
        }
    }
}

impl EditorLauncher for CommandEditor {
    fn edit(&mut self, path: &Path) -> io::Result<()> {
        let status = Command::new(&self.command).arg(path).status()?;
        if !status.success() {
            log::warn!("editor exited with {} for {}", status, path.display());
        }
        Ok(())
    }
}
