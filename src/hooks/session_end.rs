//! Session end hook handler.

use super::HookHandler;
use crate::Result;
use crate::storage::{SessionId, SessionRegistry};
use tracing::instrument;

/// Handles `SessionEnd` hook events.
///
/// Discards the session's registry. Never fails and never produces output:
/// unparseable input and a missing registry are both silently accepted.
pub struct SessionEndHandler<'a, R: SessionRegistry + ?Sized> {
    registry: &'a R,
}

impl<'a, R: SessionRegistry + ?Sized> SessionEndHandler<'a, R> {
    /// Creates a new handler backed by `registry`.
    #[must_use]
    pub const fn new(registry: &'a R) -> Self {
        Self { registry }
    }
}

impl<R: SessionRegistry + ?Sized> HookHandler for SessionEndHandler<'_, R> {
    fn event_type(&self) -> &'static str {
        "SessionEnd"
    }

    #[instrument(skip(self, input), fields(hook = "SessionEnd"))]
    fn handle(&self, input: &str) -> Result<Option<String>> {
        // Only the session id matters here; cwd may legitimately be absent.
        let session_id = serde_json::from_str::<serde_json::Value>(input)
            .ok()
            .and_then(|value| value.get("session_id")?.as_str().map(SessionId::new));

        match session_id {
            Some(session) => self.registry.destroy(&session),
            None => tracing::debug!("session end without a session id; nothing to discard"),
        }
        Ok(None)
    }
}
