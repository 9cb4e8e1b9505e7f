//! Pre tool use hook handler.

use super::{HookHandler, HookInput, context_response};
use crate::Result;
use crate::config::FilenameSet;
use crate::resolution::{Strategy, normalize};
use crate::services::{ResolutionService, render_context};
use crate::storage::SessionRegistry;
use std::path::Path;
use tracing::instrument;

/// Handles `PreToolUse` hook events.
///
/// The target directory is the parent of `tool_input.file_path` (resolved
/// against `cwd` when relative). Instruction files from that directory up to
/// the project root are delivered, nearest first, skipping those the session
/// already has. Tools without a `file_path` argument are ignored.
pub struct PreToolUseHandler<'a, R: SessionRegistry + ?Sized> {
    registry: &'a R,
}

impl<'a, R: SessionRegistry + ?Sized> PreToolUseHandler<'a, R> {
    /// Creates a new handler backed by `registry`.
    #[must_use]
    pub const fn new(registry: &'a R) -> Self {
        Self { registry }
    }
}

impl<R: SessionRegistry + ?Sized> HookHandler for PreToolUseHandler<'_, R> {
    fn event_type(&self) -> &'static str {
        "PreToolUse"
    }

    #[instrument(skip(self, input), fields(hook = "PreToolUse"))]
    fn handle(&self, input: &str) -> Result<Option<String>> {
        let input = HookInput::parse(input)?;
        let Some(file) = input.target_file() else {
            tracing::debug!(tool = ?input.tool_name, "tool input has no file_path");
            return Ok(None);
        };

        let boundary = input.boundary();
        let file = normalize(&boundary.join(file));
        let target = file.parent().map_or_else(|| file.clone(), Path::to_path_buf);

        let service = ResolutionService::new(self.registry, FilenameSet::for_project(&boundary));
        let delivered = service.resolve(&input.session(), &Strategy::upward(target, &boundary))?;
        if delivered.is_empty() {
            return Ok(None);
        }

        context_response(self.event_type(), &render_context(&delivered)).map(Some)
    }
}
