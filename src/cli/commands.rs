//! CLI command definitions and handlers.
//!
//! Each subcommand is implemented as a function that takes the parsed
//! arguments and returns a `Result`. Command handlers own the tokio
//! runtime; everything below them is async.

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use tokio::runtime::Runtime;

use crate::config::{self, Config};
use crate::dataset::{ColumnSpec, Dataset};
use crate::enrichment::http::RetryPolicy;
use crate::enrichment::{Credentials, EnrichmentConfig, EnrichmentService};
use crate::error::{Error, Result};

/// Cover Fetch CLI
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Enrich a song dataset with album-art URLs
    Enrich {
        /// Path to the input CSV
        input: PathBuf,
        /// Output path (default: <input stem>_enriched.<ext>)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Catalog client id (or set SPOTIFY_CLIENT_ID env var)
        #[arg(long, env = "SPOTIFY_CLIENT_ID")]
        client_id: Option<String>,
        /// Catalog client secret (or set SPOTIFY_CLIENT_SECRET env var)
        #[arg(long, env = "SPOTIFY_CLIENT_SECRET")]
        client_secret: Option<String>,
        /// Column holding track names
        #[arg(long)]
        track_column: Option<String>,
        /// Column holding artist names
        #[arg(long)]
        artist_column: Option<String>,
        /// Pause between rows, in milliseconds
        #[arg(long)]
        delay_ms: Option<u64>,
        /// Maximum request attempts when rate limited
        #[arg(long)]
        max_retries: Option<u32>,
    },
    /// Look up the album-art URL for a single track
    Lookup {
        /// Track name
        track: String,
        /// Artist name
        artist: String,
        /// Catalog client id (or set SPOTIFY_CLIENT_ID env var)
        #[arg(long, env = "SPOTIFY_CLIENT_ID")]
        client_id: Option<String>,
        /// Catalog client secret (or set SPOTIFY_CLIENT_SECRET env var)
        #[arg(long, env = "SPOTIFY_CLIENT_SECRET")]
        client_secret: Option<String>,
    },
}

/// Execute the parsed command.
pub fn run_command(cli: &Cli) -> anyhow::Result<()> {
    let rt = Runtime::new()?;
    let file_config = config::load();

    match &cli.command {
        Commands::Enrich {
            input,
            output,
            client_id,
            client_secret,
            track_column,
            artist_column,
            delay_ms,
            max_retries,
        } => cmd_enrich(
            &rt,
            &file_config,
            input,
            output.as_deref(),
            client_id.as_deref(),
            client_secret.as_deref(),
            track_column.as_deref(),
            artist_column.as_deref(),
            *delay_ms,
            *max_retries,
        )?,
        Commands::Lookup {
            track,
            artist,
            client_id,
            client_secret,
        } => cmd_lookup(
            &rt,
            &file_config,
            track,
            artist,
            client_id.as_deref(),
            client_secret.as_deref(),
        )?,
    }
    Ok(())
}

/// Batch enrich a dataset file
#[allow(clippy::too_many_arguments)]
fn cmd_enrich(
    rt: &Runtime,
    file_config: &Config,
    input: &Path,
    output: Option<&Path>,
    client_id: Option<&str>,
    client_secret: Option<&str>,
    track_column: Option<&str>,
    artist_column: Option<&str>,
    delay_ms: Option<u64>,
    max_retries: Option<u32>,
) -> Result<()> {
    let credentials = resolve_credentials(file_config, client_id, client_secret)?;
    let columns = resolve_columns(file_config, track_column, artist_column);
    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| derive_output_path(input));

    let mut dataset = Dataset::read_from_path(input, &columns)?;
    println!("Enriching {} row(s) from {:?}...", dataset.len(), input);

    let tuning = &file_config.enrichment;
    let mut enrich_config = EnrichmentConfig::new(credentials);
    enrich_config.retry = RetryPolicy {
        timeout: Duration::from_secs(tuning.timeout_secs),
        max_retries: max_retries.unwrap_or(tuning.max_retries),
        ..RetryPolicy::default()
    };
    enrich_config.row_delay = Duration::from_millis(delay_ms.unwrap_or(tuning.row_delay_ms));

    let service = EnrichmentService::new(enrich_config);
    let summary = rt.block_on(service.run(&mut dataset))?;

    dataset.write_to_path(&output)?;

    println!(
        "Done! {} enriched, {} no match, {} missing input, {} errors",
        summary.enriched, summary.no_match, summary.missing_input, summary.failed
    );
    println!("Wrote {:?}", output);
    Ok(())
}

/// Look up one track and print its album-art URL
fn cmd_lookup(
    rt: &Runtime,
    file_config: &Config,
    track: &str,
    artist: &str,
    client_id: Option<&str>,
    client_secret: Option<&str>,
) -> Result<()> {
    let credentials = resolve_credentials(file_config, client_id, client_secret)?;
    let service = EnrichmentService::new(EnrichmentConfig::new(credentials));

    match rt.block_on(service.lookup_track(track, artist))? {
        Some(url) => println!("{url}"),
        None => println!("No album art found for {track:?} by {artist:?}"),
    }
    Ok(())
}

/// Resolve credentials: flag (or env, via clap) first, config file second.
fn resolve_credentials(
    file_config: &Config,
    client_id: Option<&str>,
    client_secret: Option<&str>,
) -> Result<Credentials> {
    let client_id = client_id
        .map(str::to_string)
        .or_else(|| file_config.credentials.client_id.clone())
        .ok_or_else(|| {
            Error::config("missing catalog client id (use --client-id, SPOTIFY_CLIENT_ID, or the config file)")
        })?;
    let client_secret = client_secret
        .map(str::to_string)
        .or_else(|| file_config.credentials.client_secret.clone())
        .ok_or_else(|| {
            Error::config(
                "missing catalog client secret (use --client-secret, SPOTIFY_CLIENT_SECRET, or the config file)",
            )
        })?;

    Ok(Credentials {
        client_id,
        client_secret,
    })
}

/// Column names: flags override the config file.
fn resolve_columns(
    file_config: &Config,
    track_column: Option<&str>,
    artist_column: Option<&str>,
) -> ColumnSpec {
    let mut columns = file_config.dataset.clone();
    if let Some(track) = track_column {
        columns.track = track.to_string();
    }
    if let Some(artist) = artist_column {
        columns.artist = artist.to_string();
    }
    columns
}

/// songs.csv -> songs_enriched.csv, keeping the input's directory
fn derive_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("dataset");
    let name = match input.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{stem}_enriched.{ext}"),
        None => format!("{stem}_enriched"),
    };
    input.with_file_name(name)
}
