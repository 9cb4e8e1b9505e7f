//! Session start hook handler.

use super::{HookHandler, HookInput, context_response};
use crate::Result;
use crate::config::FilenameSet;
use crate::resolution::Strategy;
use crate::services::{ResolutionService, render_context};
use crate::storage::SessionRegistry;
use tracing::instrument;

/// Handles `SessionStart` hook events.
///
/// Opens the session's registry and delivers the instruction files found
/// directly in the project root.
pub struct SessionStartHandler<'a, R: SessionRegistry + ?Sized> {
    registry: &'a R,
}

impl<'a, R: SessionRegistry + ?Sized> SessionStartHandler<'a, R> {
    /// Creates a new handler backed by `registry`.
    #[must_use]
    pub const fn new(registry: &'a R) -> Self {
        Self { registry }
    }
}

impl<R: SessionRegistry + ?Sized> HookHandler for SessionStartHandler<'_, R> {
    fn event_type(&self) -> &'static str {
        "SessionStart"
    }

    #[instrument(skip(self, input), fields(hook = "SessionStart"))]
    fn handle(&self, input: &str) -> Result<Option<String>> {
        let input = HookInput::parse(input)?;
        let boundary = input.boundary();

        let service = ResolutionService::new(self.registry, FilenameSet::for_project(&boundary));
        let delivered = service.resolve(&input.session(), &Strategy::flat(&boundary))?;
        if delivered.is_empty() {
            return Ok(None);
        }

        context_response(self.event_type(), &render_context(&delivered)).map(Some)
    }
}
