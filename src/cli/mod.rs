//! Command-line interface for cover-fetch.
//!
//! This module provides the batch `enrich` command and a single-track
//! `lookup` command.

mod commands;

pub use commands::{Cli, Commands, run_command};
