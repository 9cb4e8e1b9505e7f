//! In-memory session registry.

use crate::Result;
use crate::storage::SessionId;
use crate::storage::traits::SessionRegistry;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// Session registry held entirely in process memory.
///
/// Behaves like [`FileRegistry`](super::FileRegistry) without touching the
/// filesystem. Useful for tests and for embedding the resolver in a
/// long-running process.
#[derive(Debug, Default)]
pub struct MemoryRegistry {
    sessions: Mutex<HashMap<SessionId, HashSet<PathBuf>>>,
}

impl MemoryRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if a record exists for `session`.
    #[must_use]
    pub fn is_open(&self, session: &SessionId) -> bool {
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(session)
    }

    /// Returns the number of paths recorded for `session`.
    #[must_use]
    pub fn len(&self, session: &SessionId) -> usize {
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(session)
            .map_or(0, HashSet::len)
    }
}

impl SessionRegistry for MemoryRegistry {
    fn open(&self, session: &SessionId) {
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(session.clone())
            .or_default();
    }

    fn contains(&self, session: &SessionId, path: &Path) -> bool {
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(session)
            .is_some_and(|paths| paths.contains(path))
    }

    fn add(&self, session: &SessionId, path: &Path) -> Result<()> {
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(session.clone())
            .or_default()
            .insert(path.to_path_buf());
        Ok(())
    }

    fn destroy(&self, session: &SessionId) {
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(session);
    }
}
