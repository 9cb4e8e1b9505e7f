//! Tree command handler.

use agents_md::rendering::render_tree;
use agents_md::{FilenameSet, recursive_descent};
use std::path::PathBuf;

/// Tree command.
///
/// Lists every instruction file under `dir` (default: the current
/// directory). Does not read or modify any session registry.
pub fn cmd_tree(dir: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let root = match dir {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    let filenames = FilenameSet::for_project(&root);
    let found = recursive_descent(&root, &filenames);
    tracing::debug!(root = %root.display(), count = found.len(), "listed instruction files");

    println!("{}", render_tree(&found));
    Ok(())
}
