//! Resolution service.
//!
//! Turns the raw output of a [`Strategy`] into the list of instruction files
//! that are new to a session, reads their contents, and records them in the
//! session registry.

use crate::config::FilenameSet;
use crate::resolution::Strategy;
use crate::storage::{SessionId, SessionRegistry};
use crate::{Error, Result};
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::instrument;

/// An instruction file delivered to a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivered {
    /// Boundary-relative directory label (`.` for the project root).
    pub label: String,
    /// Absolute path of the file.
    pub path: PathBuf,
    /// Full text of the file at delivery time.
    pub content: String,
}

impl Delivered {
    /// Renders the item as `[<label>]` followed by its content.
    #[must_use]
    pub fn render(&self) -> String {
        format!("[{}]\n{}", self.label, self.content)
    }
}

/// Joins delivered items into a single context blob, newline separated.
#[must_use]
pub fn render_context(delivered: &[Delivered]) -> String {
    delivered
        .iter()
        .map(Delivered::render)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Service delivering each instruction file at most once per session.
///
/// Stateless per call; all state lives in the injected registry.
pub struct ResolutionService<'a, R: SessionRegistry + ?Sized> {
    registry: &'a R,
    filenames: FilenameSet,
}

impl<'a, R: SessionRegistry + ?Sized> ResolutionService<'a, R> {
    /// Creates a service over `registry` matching `filenames`.
    #[must_use]
    pub const fn new(registry: &'a R, filenames: FilenameSet) -> Self {
        Self {
            registry,
            filenames,
        }
    }

    /// Returns the filename set in use.
    #[must_use]
    pub const fn filenames(&self) -> &FilenameSet {
        &self.filenames
    }

    /// Resolves the instruction files new to `session`.
    ///
    /// Runs `strategy`, drops files the session has already received (and
    /// repeats within this call), reads the remaining files, then records
    /// them in the registry. The result keeps the strategy's order. An empty
    /// result is the common case.
    ///
    /// All reads happen before any registration, so a failed read leaves
    /// the registry untouched and the files are offered again next time.
    /// A registration failure is logged and does not withhold content.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OperationFailed`] if a newly relevant file cannot be
    /// read.
    #[instrument(skip(self, session, strategy), fields(session = %session))]
    pub fn resolve(&self, session: &SessionId, strategy: &Strategy) -> Result<Vec<Delivered>> {
        self.registry.open(session);

        let mut seen = HashSet::new();
        let mut delivered = Vec::new();
        for located in strategy.locate(&self.filenames) {
            if !seen.insert(located.path.clone()) || self.registry.contains(session, &located.path)
            {
                continue;
            }

            let content =
                std::fs::read_to_string(&located.path).map_err(|e| Error::OperationFailed {
                    operation: "read_instruction_file".to_string(),
                    cause: format!("{}: {e}", located.path.display()),
                })?;

            delivered.push(Delivered {
                label: located.label,
                path: located.path,
                content,
            });
        }

        for item in &delivered {
            if let Err(e) = self.registry.add(session, &item.path) {
                tracing::warn!(
                    path = %item.path.display(),
                    error = %e,
                    "failed to record delivered file; it may be delivered again"
                );
            }
            tracing::debug!(label = %item.label, path = %item.path.display(), "delivered");
        }

        Ok(delivered)
    }
}
