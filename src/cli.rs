//! Command-line argument definitions.
use std::path::PathBuf;

use clap::Parser;

/// Top-level CLI entry point for the deployment engine.
#[derive(Parser, Debug)]
#[command(name = "mudot", about = "Micro dotfile deployment engine", version)]
pub struct Cli {
    /// Root of the source tree to deploy
    pub source: PathBuf,

    /// Create the symlinks instead of only previewing the plan
    #[arg(short, long)]
    pub link: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
