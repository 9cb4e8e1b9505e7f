//! Session registry storage.
//!
//! The registry remembers which instruction files a session has already
//! received. It is exposed as the [`SessionRegistry`] capability so the
//! resolution service never touches a hidden global:
//!
//! - [`FileRegistry`]: one newline-delimited record per session in a shared
//!   directory (the OS temp dir by default). Used by the hook binary.
//! - [`MemoryRegistry`]: in-process double with identical semantics.
//!
//! # Concurrency
//!
//! Hook processes for the same session may run concurrently. Records are
//! appended without locking, so two overlapping invocations can both decide
//! a file is new and deliver it twice. That race is accepted: a duplicate
//! delivery is harmless, and the registry never loses a recorded path.

pub mod filesystem;
pub mod memory;
pub mod traits;

pub use filesystem::{FileRegistry, RECORD_PREFIX};
pub use memory::MemoryRegistry;
pub use traits::SessionRegistry;

use std::fmt;

/// Opaque identifier of one assistant session.
///
/// Supplied by the host on every hook invocation. No structure is assumed;
/// any string, including an empty one, is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(String);

impl SessionId {
    /// Creates a session identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for SessionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for SessionId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}
