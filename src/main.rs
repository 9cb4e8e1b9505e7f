//! Binary entry point for agents-md.
//!
//! This binary provides the hook and listing commands.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Allow print_stderr in main binary for CLI output
#![allow(clippy::print_stderr)]
#![allow(clippy::print_stdout)]
// Allow needless_pass_by_value for command functions
#![allow(clippy::needless_pass_by_value)]
// Allow multiple crate versions from transitive dependencies
#![allow(clippy::multiple_crate_versions)]

mod commands;

use agents_md::AgentsMdConfig;
use agents_md::observability::{self, InitOptions};
use clap::{Parser, Subcommand};
use commands::{HookEvent, cmd_hook, cmd_tree};
use std::path::PathBuf;
use std::process::ExitCode;

/// agents-md - Injects project instruction files into assistant sessions.
#[derive(Parser)]
#[command(name = "agents-md")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file.
    #[arg(short, long, global = true, env = "AGENTS_MD_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Handle assistant lifecycle hooks.
    Hook {
        /// Hook event type.
        #[command(subcommand)]
        event: HookEvent,
    },

    /// List instruction files in the project as a tree.
    Tree {
        /// Project root (default: current directory).
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },
}

/// Main entry point.
fn main() -> ExitCode {
    let cli = Cli::parse();
    let session_end = matches!(
        cli.command,
        Commands::Hook {
            event: HookEvent::SessionEnd
        }
    );

    // Neither teardown nor listing depends on the tool config.
    let config_optional = session_end || matches!(cli.command, Commands::Tree { .. });

    let config = match AgentsMdConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) if config_optional => {
            eprintln!("Warning: {e}; using default configuration");
            AgentsMdConfig::default()
        },
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        },
    };

    // Logging problems must not block the host's tool call.
    if let Err(e) = observability::init_from_config(
        &config.logging,
        InitOptions {
            verbose: cli.verbose,
        },
    ) {
        eprintln!("Warning: failed to initialize logging: {e}");
    }

    let result = match cli.command {
        Commands::Hook { event } => cmd_hook(event, &config),
        Commands::Tree { dir } => cmd_tree(dir),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) if session_end => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        },
    }
}
