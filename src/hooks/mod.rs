//! Assistant lifecycle hooks.
//!
//! Implements handlers for the hook events that drive instruction-file
//! delivery.
//!
//! # Hook Input
//!
//! Every hook receives a single JSON object on stdin:
//!
//! ```json
//! {
//!   "session_id": "abc-123",
//!   "cwd": "/work/project",
//!   "hook_event_name": "PreToolUse",
//!   "tool_name": "Read",
//!   "tool_input": { "file_path": "/work/project/src/lib.rs" }
//! }
//! ```
//!
//! `session_id` and `cwd` are required; everything else is optional and
//! unknown fields are ignored.
//!
//! # Hook Response JSON Format
//!
//! | Event | `hookEventName` | `additionalContext` Content |
//! |-------|-----------------|----------------------------|
//! | Session start | `SessionStart` | Instruction files at the project root |
//! | Pre tool use | `PreToolUse` | Instruction files between the touched file and the root |
//! | Session end | (no output) | Registry is discarded |
//!
//! ```json
//! {
//!   "hookSpecificOutput": {
//!     "hookEventName": "PreToolUse",
//!     "additionalContext": "[src]\n...\n[.]\n..."
//!   }
//! }
//! ```
//!
//! ## Empty Response
//!
//! When nothing new is found a handler returns `None` and the process
//! prints nothing. This is the normal outcome for most tool calls.

mod pre_tool_use;
mod session_end;
mod session_start;

pub use pre_tool_use::PreToolUseHandler;
pub use session_end::SessionEndHandler;
pub use session_start::SessionStartHandler;

use crate::resolution::normalize;
use crate::storage::SessionId;
use crate::{Error, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// Trait for hook handlers.
pub trait HookHandler: Send + Sync {
    /// The hook event type this handler processes.
    fn event_type(&self) -> &'static str;

    /// Handles the hook event.
    ///
    /// Returns the JSON response to print, or `None` when there is nothing
    /// to report.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is malformed or a file being delivered
    /// cannot be read.
    fn handle(&self, input: &str) -> Result<Option<String>>;
}

/// Hook input envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct HookInput {
    /// Host session identifier.
    pub session_id: String,
    /// Working directory of the session; the resolution boundary.
    pub cwd: PathBuf,
    /// Tool about to run (pre-tool-use only).
    #[serde(default)]
    pub tool_name: Option<String>,
    /// Tool arguments (pre-tool-use only).
    #[serde(default)]
    pub tool_input: Option<serde_json::Value>,
}

impl HookInput {
    /// Parses a hook envelope.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the input is not a JSON object
    /// with string `session_id` and non-empty `cwd` fields.
    pub fn parse(input: &str) -> Result<Self> {
        let parsed: Self = serde_json::from_str(input)
            .map_err(|e| Error::InvalidInput(format!("hook input: {e}")))?;
        if parsed.cwd.as_os_str().is_empty() {
            return Err(Error::InvalidInput("hook input: empty cwd".to_string()));
        }
        Ok(parsed)
    }

    /// Returns the session identifier.
    #[must_use]
    pub fn session(&self) -> SessionId {
        SessionId::new(self.session_id.clone())
    }

    /// Returns the resolution boundary as a normalised absolute path.
    #[must_use]
    pub fn boundary(&self) -> PathBuf {
        let absolute = std::path::absolute(&self.cwd).unwrap_or_else(|_| self.cwd.clone());
        normalize(&absolute)
    }

    /// Returns `tool_input.file_path`, if present and a string.
    #[must_use]
    pub fn target_file(&self) -> Option<PathBuf> {
        self.tool_input
            .as_ref()?
            .get("file_path")?
            .as_str()
            .filter(|path| !path.is_empty())
            .map(PathBuf::from)
    }
}

/// Builds the context-injection response for `event`.
///
/// # Errors
///
/// Returns an error if the response cannot be serialized.
pub fn context_response(event: &str, context: &str) -> Result<String> {
    let response = serde_json::json!({
        "hookSpecificOutput": {
            "hookEventName": event,
            "additionalContext": context,
        }
    });
    serde_json::to_string(&response).map_err(|e| Error::OperationFailed {
        operation: "serialize_response".to_string(),
        cause: e.to_string(),
    })
}
