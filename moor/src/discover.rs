//! Project discovery
//!
//! Scans the projects directory for directories containing a `.git` entry
//! and registers each in the store before the UI starts. The walk skips the
//! same noise directories as the file tree, but still records nested
//! repositories inside directories it does visit.

use std::path::Path;

use moor_store::{ProjectStore, StoreError};

use crate::collab::tree::is_excluded_dir;

/// Scan `root` recursively, upserting every git repository found.
/// Returns how many repositories were seen.
pub fn discover_projects(
    root: &Path,
    store: &mut dyn ProjectStore,
) -> Result<usize, StoreError> {
    let mut found = 0;
    scan(root, store, &mut found)?;
    log::info!("discovered {} projects under {}", found, root.display());
    Ok(found)
}

fn scan(dir: &Path, store: &mut dyn ProjectStore, found: &mut usize) -> Result<(), StoreError> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            log::debug!("skipping unreadable directory {}: {}", dir.display(), e);
            return Ok(());
        }
    };

    let mut subdirs = Vec::new();
    let mut is_repo = false;
    for entry in entries.filter_map(Result::ok) {
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        match path.file_name().and_then(|n| n.to_str()) {
            Some(".git") => is_repo = true,
            Some(name) if is_excluded_dir(name) => {}
            Some(_) => subdirs.push(path),
            None => {}
        }
    }

    if is_repo {
        let name = dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| dir.display().to_string());
        store.upsert_project(&name, dir)?;
        *found += 1;
    }

    subdirs.sort();
    for subdir in subdirs {
        scan(&subdir, store, found)?;
    }
    Ok(())
}
