//! Instruction file resolution.
//!
//! Everything here is stateless: given a filename set and a location, it
//! reports which instruction files exist. Deciding which of them are new to
//! a session is the job of [`ResolutionService`](crate::services::ResolutionService).
//!
//! | Policy | Used by | Order |
//! |--------|---------|-------|
//! | [`Strategy::Upward`] | pre-tool-use hook | target directory first, boundary last |
//! | [`Strategy::Flat`] | session-start hook | boundary only |
//! | [`recursive_descent`] | `tree` command | depth-first, name order, skips [`SKIP_DIRS`] |

mod descent;
mod matcher;
mod path;
mod strategy;

pub use descent::{SKIP_DIRS, recursive_descent};
pub use matcher::{Match, find_matching_files};
pub use path::{display_label, normalize};
pub use strategy::{Located, Strategy};
