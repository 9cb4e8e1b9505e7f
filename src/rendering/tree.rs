//! ASCII tree listing of instruction files.

/// Output when no instruction files exist.
pub const NONE_FOUND_MESSAGE: &str = "No agent instruction files found.";

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";

/// Renders relative paths as a flat tree under a `.` header.
///
/// ```text
/// .
/// ├── agents.md
/// └── src/agents.md
/// ```
///
/// An empty list renders [`NONE_FOUND_MESSAGE`].
#[must_use]
pub fn render_tree<S: AsRef<str>>(paths: &[S]) -> String {
    if paths.is_empty() {
        return NONE_FOUND_MESSAGE.to_string();
    }

    let mut lines = Vec::with_capacity(paths.len() + 1);
    lines.push(".".to_string());
    for (i, path) in paths.iter().enumerate() {
        let prefix = if i + 1 == paths.len() {
            LAST_BRANCH
        } else {
            BRANCH
        };
        lines.push(format!("{prefix}{}", path.as_ref()));
    }
    lines.join("\n")
}
