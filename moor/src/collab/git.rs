//! Git status provider
//!
//! Shells out to `git`. Failures never surface to the UI: a project whose
//! status cannot be read simply shows an empty status section.

use std::path::Path;
use std::process::Command;

pub trait StatusProvider {
    /// Short status lines for the repository at `path`; empty on failure
    fn status_lines(&self, path: &Path) -> Vec<String>;

    /// Run `git fetch` in the repository; true when it succeeded
    fn fetch(&self, path: &Path) -> bool;
}

/// The real provider, invoking the `git` binary
#[derive(Debug, Default)]
pub struct GitStatus;

impl GitStatus {
    pub fn new() -> Self {
        GitStatus
    }
}

impl StatusProvider for GitStatus {
    fn status_lines(&self, path: &Path) -> Vec<String> {
        let output = Command::new("git")
            .arg("-C")
            .arg(path)
            .args(["status", "-bs"])
            .output();
        match output {
            Ok(out) if out.status.success() => String::from_utf8_lossy(&out.stdout)
                .lines()
                .map(str::to_string)
                .collect(),
            Ok(out) => {
                log::debug!(
                    "git status failed in {}: {}",
                    path.display(),
                    String::from_utf8_lossy(&out.stderr).trim()
                );
                Vec::new()
            }
            Err(e) => {
                log::debug!("could not run git in {}: {}", path.display(), e);
                Vec::new()
            }
        }
    }

    fn fetch(&self, path: &Path) -> bool {
        match Command::new("git")
            .arg("-C")
            .arg(path)
            .arg("fetch")
            .status()
        {
            Ok(status) => status.success(),
            Err(e) => {
                log::warn!("could not run git fetch in {}: {}", path.display(), e);
                false
            }
        }
    }
}
