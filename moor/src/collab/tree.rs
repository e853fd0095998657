//! File-tree provider
//!
//! Depth-first directory listing with build/VCS noise filtered out. The
//! walk runs once per project-screen entry and is cached there, never per
//! frame.

use std::path::{Path, PathBuf};

/// Directory names that never appear in the tree
pub const EXCLUDED_DIRS: &[&str] = &["obj", "bin", "node_modules", "__pycache__", ".git", ".config"];

/// True for directories the walk skips entirely
pub fn is_excluded_dir(name: &str) -> bool {
    name.starts_with('.') || name.starts_with('_') || EXCLUDED_DIRS.contains(&name)
}

pub trait TreeProvider {
    /// All paths under `root`, depth first, a directory before its contents
    fn list_tree(&self, root: &Path) -> Vec<PathBuf>;
}

/// The real walker over std::fs
#[derive(Debug, Default)]
pub struct FsTree;

impl FsTree {
    pub fn new() -> Self {
        FsTree
    }

    fn walk(dir: &Path, out: &mut Vec<PathBuf>) {
        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                log::debug!("skipping unreadable directory {}: {}", dir.display(), e);
                return;
            }
        };

        let mut paths: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .collect();
        paths.sort();

        for path in paths {
            let name = match path.file_name().and_then(|n| n.to_str()) {
                Some(name) => name,
                None => continue,
            };
            if path.is_dir() {
                if is_excluded_dir(name) {
                    continue;
                }
                out.push(path.clone());
                Self::walk(&path, out);
            } else {
                out.push(path);
            }
        }
    }
}

impl TreeProvider for FsTree {
    fn list_tree(&self, root: &Path) -> Vec<PathBuf> {
        let mut out = Vec::new();
        Self::walk(root, &mut out);
        out
    }
}
