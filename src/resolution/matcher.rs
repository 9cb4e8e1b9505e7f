//! Directory matcher.

use crate::config::FilenameSet;
use std::fs;
use std::path::{Path, PathBuf};

/// An instruction file found in a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    /// Directory the file was found in.
    pub dir: PathBuf,
    /// Path of the file, `dir` joined with the entry name.
    pub path: PathBuf,
}

/// Lists the instruction files directly inside `dir`.
///
/// Entry names are compared case-insensitively against `filenames`; the
/// on-disk spelling is kept in the returned path. Only direct children are
/// considered, and directories are never matches. A directory that cannot
/// be listed yields no matches.
///
/// Matches are sorted by file name so that callers see a stable order.
#[must_use]
pub fn find_matching_files(dir: &Path, filenames: &FilenameSet) -> Vec<Match> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::trace!(dir = %dir.display(), error = %e, "skipping unreadable directory");
            return Vec::new();
        },
    };

    let mut matches: Vec<Match> = entries
        .flatten()
        .filter(|entry| {
            entry
                .file_name()
                .to_str()
                .is_some_and(|name| filenames.matches(name))
        })
        .map(|entry| entry.path())
        .filter(|path| fs::metadata(path).is_ok_and(|meta| !meta.is_dir()))
        .map(|path| Match {
            dir: dir.to_path_buf(),
            path,
        })
        .collect();

    matches.sort_by(|a, b| a.path.file_name().cmp(&b.path.file_name()));
    matches
}
