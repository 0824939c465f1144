//! repocat - concatenate a filtered repository tree into one text document
//!
//! repocat provides:
//! - Recursive file discovery with gitignore support
//! - Include/exclude glob selection (exclude wins)
//! - A stable concatenated output format with a `[<N> lines]` trailer
//! - Atomic output-file writes

use anyhow::Result;
use clap::Parser;

mod cli;
mod core;
mod engine;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::run(cli)
}
