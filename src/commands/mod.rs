//! Command handlers module.
//!
//! - `hook.rs`: lifecycle hook events
//! - `tree.rs`: instruction file listing

mod hook;
mod tree;

use clap::Subcommand;

pub use hook::cmd_hook;
pub use tree::cmd_tree;

/// Hook events.
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookEvent {
    /// Session start hook.
    SessionStart,
    /// Pre tool use hook.
    PreToolUse,
    /// Session end hook.
    SessionEnd,
}

impl HookEvent {
    /// Returns the hook event as a lowercase hyphenated string.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SessionStart => "session-start",
            Self::PreToolUse => "pre-tool-use",
            Self::SessionEnd => "session-end",
        }
    }
}
