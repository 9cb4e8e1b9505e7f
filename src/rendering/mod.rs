//! Text rendering for command output.

mod tree;

pub use tree::{NONE_FOUND_MESSAGE, render_tree};
