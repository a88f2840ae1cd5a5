//! Command-line arguments for the quote explorer.
//!
//! This module defines the CLI interface using `clap`. See `main` for end-to-end usage.
use std::path::PathBuf;

use clap::Parser;
use quote_common::config::DEFAULT_QUOTE_COUNT;

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Number of quotes generated at startup.
    #[clap(long, default_value_t = DEFAULT_QUOTE_COUNT)]
    pub count: usize,

    /// Seed for the random generator; omit for a different collection every run.
    #[clap(long)]
    pub seed: Option<u64>,

    /// Read commands from this file instead of stdin.
    #[clap(long)]
    pub script: Option<PathBuf>,

    /// Print views as JSON instead of text.
    #[clap(long)]
    pub json: bool,
}
