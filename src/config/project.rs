//! Per-project filename configuration.
//!
//! A project may place `.agents-md.json` at its root to rename the files
//! treated as instruction files:
//!
//! ```json
//! { "filenames": ["AGENTS.md", "CLAUDE.md"] }
//! ```
//!
//! The file is optional. Anything short of a non-empty list of strings is
//! treated exactly like a missing file.

use serde::Deserialize;
use std::path::Path;

/// Name of the project configuration file, looked up at the project root.
pub const PROJECT_CONFIG_FILENAME: &str = ".agents-md.json";

/// Filenames used when the project does not configure any.
pub const DEFAULT_FILENAMES: &[&str] = &["agents.md"];

/// Project configuration file structure (for JSON parsing).
#[derive(Debug, Deserialize, Default)]
struct ProjectConfigFile {
    filenames: Option<Vec<String>>,
}

/// Ordered set of filenames recognised as instruction files.
///
/// Comparison against directory entries is case-insensitive. The set is
/// resolved once per invocation and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilenameSet {
    names: Vec<String>,
    /// Lowercased copies of `names`, same order.
    folded: Vec<String>,
}

impl FilenameSet {
    /// Creates a filename set from explicit names, preserving their order.
    ///
    /// An empty input yields the default set.
    #[must_use]
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            return Self::default();
        }
        let folded = names.iter().map(|name| name.to_lowercase()).collect();
        Self { names, folded }
    }

    /// Resolves the filename set for a project root.
    ///
    /// Reads [`PROJECT_CONFIG_FILENAME`] from `root`. Read and parse failures
    /// fall back to [`DEFAULT_FILENAMES`]; they are never reported as errors.
    #[must_use]
    pub fn for_project(root: &Path) -> Self {
        let path = root.join(PROJECT_CONFIG_FILENAME);
        let Ok(contents) = std::fs::read_to_string(&path) else {
            return Self::default();
        };

        match serde_json::from_str::<ProjectConfigFile>(&contents) {
            Ok(ProjectConfigFile {
                filenames: Some(names),
            }) if !names.is_empty() => Self::new(names),
            Ok(_) => {
                tracing::debug!(path = %path.display(), "no filenames configured; using defaults");
                Self::default()
            },
            Err(e) => {
                tracing::debug!(
                    path = %path.display(),
                    error = %e,
                    "ignoring malformed project config"
                );
                Self::default()
            },
        }
    }

    /// Returns true if `name` case-insensitively equals one of the filenames.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        self.folded.iter().any(|candidate| *candidate == name)
    }

    /// Returns the configured filenames in order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }
}

impl Default for FilenameSet {
    fn default() -> Self {
        let names: Vec<String> = DEFAULT_FILENAMES.iter().map(ToString::to_string).collect();
        let folded = names.iter().map(|name| name.to_lowercase()).collect();
        Self { names, folded }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use test_case::test_case;

    fn write_config(dir: &TempDir, contents: &str) {
        std::fs::write(dir.path().join(PROJECT_CONFIG_FILENAME), contents).unwrap();
    }

    #[test]
    fn test_defaults_without_config() {
        let dir = TempDir::new().unwrap();
        let set = FilenameSet::for_project(dir.path());
        assert_eq!(set.names(), &["agents.md".to_string()]);
    }

    #[test]
    fn test_custom_filenames_from_config() {
        let dir = TempDir::new().unwrap();
        write_config(&dir, r#"{"filenames": ["CLAUDE.md", "agents.md"]}"#);

        let set = FilenameSet::for_project(dir.path());
        assert_eq!(
            set.names(),
            &["CLAUDE.md".to_string(), "agents.md".to_string()]
        );
    }

    #[test_case("not json at all" ; "invalid json")]
    #[test_case(r#"{"filenames": []}"# ; "empty list")]
    #[test_case(r#"{"filenames": "agents.md"}"# ; "string instead of list")]
    #[test_case(r#"{"filenames": ["a.md", 3]}"# ; "non string element")]
    #[test_case(r#"{"other": true}"# ; "missing key")]
    #[test_case("[1, 2]" ; "array at top level")]
    fn test_malformed_config_falls_back(contents: &str) {
        let dir = TempDir::new().unwrap();
        write_config(&dir, contents);
        assert_eq!(FilenameSet::for_project(dir.path()), FilenameSet::default());
    }

    #[test_case("agents.md" ; "exact")]
    #[test_case("AGENTS.MD" ; "upper")]
    #[test_case("AgEnTs.Md" ; "mixed")]
    fn test_matches_case_insensitively(name: &str) {
        assert!(FilenameSet::default().matches(name));
    }

    #[test]
    fn test_does_not_match_other_names() {
        let set = FilenameSet::default();
        assert!(!set.matches("agents.md.bak"));
        assert!(!set.matches("readme.md"));
    }

    #[test]
    fn test_configured_names_match_case_insensitively() {
        let set = FilenameSet::new(["CLAUDE.md"]);
        assert!(set.matches("claude.md"));
        assert!(!set.matches("agents.md"));
    }

    #[test]
    fn test_new_with_no_names_is_default() {
        assert_eq!(FilenameSet::new(Vec::<String>::new()), FilenameSet::default());
    }
}
