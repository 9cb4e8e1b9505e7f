//! Recursive descent for the listing command.

use super::path::display_label;
use crate::config::FilenameSet;
use std::ffi::OsStr;
use std::path::Path;
use walkdir::{DirEntry, WalkDir};

/// Directory names never descended into.
pub const SKIP_DIRS: &[&str] = &[
    "node_modules",
    ".git",
    ".hg",
    ".svn",
    "__pycache__",
    ".venv",
    "venv",
    "dist",
    "build",
];

/// Finds every instruction file under `root`.
///
/// Traverses depth-first, visiting the entries of each directory in
/// file-name order, and skips directories listed in [`SKIP_DIRS`] (the root
/// itself is always entered). Returns root-relative, `/`-separated paths in
/// traversal order. Symbolic links are not followed and unreadable
/// directories are skipped.
///
/// Independent of any session: the full result is returned every time.
#[must_use]
pub fn recursive_descent(root: &Path, filenames: &FilenameSet) -> Vec<String> {
    WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_skipped_dir(entry))
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::trace!(error = %e, "skipping unreadable entry");
                None
            },
        })
        .filter(|entry| entry.depth() > 0 && !entry.file_type().is_dir())
        .filter(|entry| {
            entry
                .file_name()
                .to_str()
                .is_some_and(|name| filenames.matches(name))
        })
        .filter_map(|entry| {
            entry
                .path()
                .strip_prefix(root)
                .ok()
                .map(display_label)
        })
        .collect()
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir() && SKIP_DIRS.iter().any(|skip| entry.file_name() == OsStr::new(skip))
}
