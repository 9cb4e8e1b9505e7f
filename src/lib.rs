//! # agents-md
//!
//! Surfaces project instruction files (`agents.md` by default) to an AI
//! coding assistant through its lifecycle hooks.
//!
//! Each hook invocation is a short-lived process. Given the project root and
//! a target location, the crate locates the instruction files that apply,
//! hands back their contents, and records them in a per-session registry so
//! that no file is delivered twice within one assistant session.
//!
//! ## Features
//!
//! - Nearest-first upward walk from a touched file to the project root
//! - Case-insensitive filename matching against a configurable filename set
//! - Exactly-once delivery per session, persisted across processes
//! - Stateless tree listing of every instruction file in a project
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use agents_md::{FileRegistry, FilenameSet, ResolutionService, SessionId, Strategy};
//!
//! let root = Path::new("/work/project");
//! let registry = FileRegistry::in_temp_dir();
//! let service = ResolutionService::new(&registry, FilenameSet::for_project(root));
//!
//! let session = SessionId::new("abc-123");
//! let delivered = service.resolve(&session, &Strategy::flat(root))?;
//! for item in &delivered {
//!     println!("[{}]", item.label);
//! }
//! # Ok::<(), agents_md::Error>(())
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![allow(clippy::multiple_crate_versions)]

use thiserror::Error as ThisError;

pub mod config;
pub mod hooks;
pub mod observability;
pub mod rendering;
pub mod resolution;
pub mod services;
pub mod storage;

pub use config::{AgentsMdConfig, DEFAULT_FILENAMES, FilenameSet, PROJECT_CONFIG_FILENAME};
pub use resolution::{Match, SKIP_DIRS, Strategy, find_matching_files, recursive_descent};
pub use services::{Delivered, ResolutionService};
pub use storage::{FileRegistry, MemoryRegistry, SessionId, SessionRegistry};

/// Error type for agents-md operations.
///
/// Only two classes of failure ever leave the library: a hook envelope that
/// cannot be understood, and I/O the caller has committed to (reading an
/// instruction file that is being delivered, or an explicitly named config
/// file). Everything else degrades to "found nothing".
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `InvalidInput` | Hook input is not JSON, or lacks `session_id` / `cwd` |
/// | `OperationFailed` | A delivered file or explicit config file cannot be read |
#[derive(Debug, ThisError)]
pub enum Error {
    /// Invalid input was provided.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An operation failed.
    #[error("operation '{operation}' failed: {cause}")]
    OperationFailed {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },
}

/// Result type alias for agents-md operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidInput("missing session_id".to_string());
        assert_eq!(err.to_string(), "invalid input: missing session_id");

        let err = Error::OperationFailed {
            operation: "read_instruction_file".to_string(),
            cause: "permission denied".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "operation 'read_instruction_file' failed: permission denied"
        );
    }
}
