//! Hook command handler.
//!
//! Reads the hook envelope from stdin, dispatches to the matching handler,
//! and prints the handler's response, if any, to stdout.

use agents_md::AgentsMdConfig;
use agents_md::hooks::{HookHandler, PreToolUseHandler, SessionEndHandler, SessionStartHandler};
use agents_md::storage::FileRegistry;
use std::io::{self, Read};
use tracing::info_span;

use super::HookEvent;

/// Hook command.
pub fn cmd_hook(event: HookEvent, config: &AgentsMdConfig) -> Result<(), Box<dyn std::error::Error>> {
    let request_id = uuid::Uuid::now_v7().to_string();
    let span = info_span!(
        "agents_md.hook.invoke",
        request_id = %request_id,
        hook = event.as_str(),
        session = tracing::field::Empty
    );
    let _span_guard = span.enter();

    let registry = FileRegistry::new(&config.registry_dir);

    let result = read_hook_input().and_then(|input| {
        if let Some(session) = session_id(&input) {
            span.record("session", session.as_str());
        }
        match event {
            HookEvent::SessionStart => SessionStartHandler::new(&registry).handle(&input),
            HookEvent::PreToolUse => PreToolUseHandler::new(&registry).handle(&input),
            HookEvent::SessionEnd => SessionEndHandler::new(&registry).handle(&input),
        }
    });

    match result {
        Ok(Some(response)) => {
            println!("{response}");
            Ok(())
        },
        Ok(None) => Ok(()),
        Err(e) if event == HookEvent::SessionEnd => {
            tracing::debug!(error = %e, "ignoring session end failure");
            Ok(())
        },
        Err(e) => {
            tracing::error!(error = %e, "hook failed");
            Err(Box::new(e))
        },
    }
}

/// Extracts `session_id` from a raw envelope without validating the rest.
fn session_id(input: &str) -> Option<String> {
    serde_json::from_str::<serde_json::Value>(input)
        .ok()?
        .get("session_id")?
        .as_str()
        .map(ToString::to_string)
}

/// Reads hook input from stdin as a string.
fn read_hook_input() -> agents_md::Result<String> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .map_err(|e| agents_md::Error::OperationFailed {
            operation: "read_hook_input".to_string(),
            cause: e.to_string(),
        })?;
    Ok(input)
}
