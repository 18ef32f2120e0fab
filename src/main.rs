//! Cover Fetch - batch album-art enrichment for song datasets.
//!
//! Reads a CSV of songs, resolves each track against the Spotify catalog
//! by name and artist, and writes the dataset back out with an album-art
//! URL column added.

pub mod cli;
pub mod config;
pub mod dataset;
pub mod enrichment;
pub mod error;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(EnvFilter::from_default_env().add_directive("cover_fetch=info".parse().unwrap()))
        .init();

    cli::run_command(&args)
}
