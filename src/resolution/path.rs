//! Lexical path helpers.

use std::path::{Component, Path, PathBuf};

/// Folds `.` and `..` components without touching the filesystem.
///
/// `..` at the root (or at the start of a relative path) is dropped.
#[must_use]
pub fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir | Component::Normal(_) => {
                normalized.push(component.as_os_str());
            },
            Component::CurDir => {},
            Component::ParentDir => {
                if !matches!(
                    normalized.components().next_back(),
                    None | Some(Component::RootDir | Component::Prefix(_))
                ) {
                    normalized.pop();
                }
            },
        }
    }
    normalized
}

/// Renders a boundary-relative path for display: `/`-separated, or `.` for
/// the boundary itself.
#[must_use]
pub fn display_label(relative: &Path) -> String {
    let parts: Vec<_> = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect();

    if parts.is_empty() {
        ".".to_string()
    } else {
        parts.join("/")
    }
}
