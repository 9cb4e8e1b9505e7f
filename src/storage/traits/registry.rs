//! Session registry trait.

use crate::Result;
use crate::storage::SessionId;
use std::path::Path;

/// Per-session record of instruction files already delivered.
///
/// A registry is shared by every hook invocation carrying the same
/// [`SessionId`], including invocations running in separate processes.
/// Implementations must keep `add` idempotent: a path is recorded at most
/// once per session.
///
/// Apart from [`add`](Self::add), operations never fail. Backends that lose
/// access to their store degrade to remembering paths for the current
/// process only, which can cause a later redelivery but never a lost one.
pub trait SessionRegistry: Send + Sync {
    /// Ensures a record exists for `session`, creating an empty one if needed.
    fn open(&self, session: &SessionId);

    /// Returns true if `path` has already been delivered to `session`.
    fn contains(&self, session: &SessionId, path: &Path) -> bool;

    /// Records `path` as delivered to `session`.
    ///
    /// Opens the record implicitly. Adding a path that is already present
    /// is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the path could not be persisted. The path is
    /// still remembered for the remainder of the process.
    fn add(&self, session: &SessionId, path: &Path) -> Result<()>;

    /// Removes the record for `session`. A missing record is not an error.
    fn destroy(&self, session: &SessionId);
}
