//! Upward walk and flat scan.

use super::matcher::find_matching_files;
use super::path::{display_label, normalize};
use crate::config::FilenameSet;
use std::path::{Path, PathBuf};

/// An instruction file located by a [`Strategy`], labelled for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Located {
    /// Directory of the file relative to the boundary (`.` for the boundary).
    pub label: String,
    /// Absolute path of the file.
    pub path: PathBuf,
}

/// Traversal policy used to locate instruction files for one hook event.
///
/// Both policies are confined to a boundary directory, the project root.
/// Paths are normalised lexically; containment is decided on path
/// components and never requires the directories to exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Strategy {
    /// Walks from `target` up to and including `boundary`, nearest first.
    Upward {
        /// Directory the walk starts from.
        target: PathBuf,
        /// Project root; the walk never leaves it.
        boundary: PathBuf,
    },
    /// Scans `boundary` alone.
    Flat {
        /// Project root.
        boundary: PathBuf,
    },
}

impl Strategy {
    /// Creates an upward walk from `target` to `boundary`.
    ///
    /// A relative `target` is resolved against `boundary`.
    #[must_use]
    pub fn upward(target: impl AsRef<Path>, boundary: impl AsRef<Path>) -> Self {
        let boundary = normalize(boundary.as_ref());
        let target = normalize(&boundary.join(target.as_ref()));
        Self::Upward { target, boundary }
    }

    /// Creates a flat scan of `boundary`.
    #[must_use]
    pub fn flat(boundary: impl AsRef<Path>) -> Self {
        Self::Flat {
            boundary: normalize(boundary.as_ref()),
        }
    }

    /// Returns the boundary directory.
    #[must_use]
    pub fn boundary(&self) -> &Path {
        match self {
            Self::Upward { boundary, .. } | Self::Flat { boundary } => boundary,
        }
    }

    /// Locates instruction files according to this policy.
    ///
    /// The result is ordered: for an upward walk, the target directory's
    /// files come first and the boundary's last. An empty boundary contains
    /// nothing.
    #[must_use]
    pub fn locate(&self, filenames: &FilenameSet) -> Vec<Located> {
        if self.boundary().as_os_str().is_empty() {
            return Vec::new();
        }
        match self {
            Self::Upward { target, boundary } => upward_walk(target, boundary, filenames),
            Self::Flat { boundary } => flat_scan(boundary, filenames),
        }
    }
}

/// Walks from `target` to `boundary`, collecting matches nearest first.
///
/// Stops without emitting as soon as the current directory is not the
/// boundary or nested inside it, so a target outside the boundary yields
/// nothing.
fn upward_walk(target: &Path, boundary: &Path, filenames: &FilenameSet) -> Vec<Located> {
    let mut located = Vec::new();
    let mut dir = target.to_path_buf();

    loop {
        let Ok(relative) = dir.strip_prefix(boundary) else {
            break;
        };
        let label = display_label(relative);
        let at_boundary = relative.as_os_str().is_empty();

        located.extend(
            find_matching_files(&dir, filenames)
                .into_iter()
                .map(|m| Located {
                    label: label.clone(),
                    path: m.path,
                }),
        );

        if at_boundary || !dir.pop() {
            break;
        }
    }

    located
}

fn flat_scan(boundary: &Path, filenames: &FilenameSet) -> Vec<Located> {
    find_matching_files(boundary, filenames)
        .into_iter()
        .map(|m| Located {
            label: display_label(Path::new("")),
            path: m.path,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn project() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("src/components")).unwrap();
        fs::write(dir.path().join("agents.md"), "root").unwrap();
        fs::write(dir.path().join("src/agents.md"), "src").unwrap();
        fs::write(dir.path().join("src/components/AGENTS.md"), "components").unwrap();
        dir
    }

    fn labels(located: &[Located]) -> Vec<&str> {
        located.iter().map(|l| l.label.as_str()).collect()
    }

    #[test]
    fn test_upward_walk_is_nearest_first() {
        let dir = project();
        let strategy = Strategy::upward(dir.path().join("src/components"), dir.path());

        let located = strategy.locate(&FilenameSet::default());

        assert_eq!(labels(&located), vec!["src/components", "src", "."]);
        assert_eq!(located[0].path, dir.path().join("src/components/AGENTS.md"));
        assert_eq!(located[2].path, dir.path().join("agents.md"));
    }

    #[test]
    fn test_upward_walk_from_boundary_scans_boundary_only() {
        let dir = project();
        let located = Strategy::upward(dir.path(), dir.path()).locate(&FilenameSet::default());
        assert_eq!(labels(&located), vec!["."]);
    }

    #[test]
    fn test_upward_walk_relative_target() {
        let dir = project();
        let located = Strategy::upward("src", dir.path()).locate(&FilenameSet::default());
        assert_eq!(labels(&located), vec!["src", "."]);
    }

    #[test]
    fn test_upward_walk_outside_boundary_is_empty() {
        let dir = project();
        let boundary = dir.path().join("src");
        let located = Strategy::upward(dir.path(), &boundary).locate(&FilenameSet::default());
        assert!(located.is_empty());
    }

    #[test]
    fn test_upward_walk_dotdot_escape_is_empty() {
        let dir = project();
        let boundary = dir.path().join("src");
        let located =
            Strategy::upward("components/../..", &boundary).locate(&FilenameSet::default());
        assert!(located.is_empty());
    }

    #[test]
    fn test_upward_walk_sibling_prefix_is_outside() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("app")).unwrap();
        fs::create_dir_all(dir.path().join("app-other")).unwrap();
        fs::write(dir.path().join("app-other/agents.md"), "x").unwrap();

        let located = Strategy::upward(dir.path().join("app-other"), dir.path().join("app"))
            .locate(&FilenameSet::default());
        assert!(located.is_empty());
    }

    #[test]
    fn test_upward_walk_missing_directories_are_skipped() {
        let dir = project();
        let located = Strategy::upward(dir.path().join("src/new/dir"), dir.path())
            .locate(&FilenameSet::default());
        assert_eq!(labels(&located), vec!["src", "."]);
    }

    #[test]
    fn test_flat_scan_ignores_subdirectories() {
        let dir = project();
        let located = Strategy::flat(dir.path()).locate(&FilenameSet::default());
        assert_eq!(labels(&located), vec!["."]);
        assert_eq!(located[0].path, dir.path().join("agents.md"));
    }

    #[test]
    fn test_empty_boundary_contains_nothing() {
        let dir = project();
        let filenames = FilenameSet::default();

        assert!(Strategy::upward(dir.path().join("src"), "").locate(&filenames).is_empty());
        assert!(Strategy::flat("").locate(&filenames).is_empty());
    }

    #[test]
    fn test_boundary_accessor() {
        let strategy = Strategy::flat("/work/project/./");
        assert_eq!(strategy.boundary(), Path::new("/work/project"));
    }
}
