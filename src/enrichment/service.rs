//! Batch enrichment service - orchestrates the per-row flow.
//!
//! 1. Acquire one access token (fatal on failure - an invalid token cannot
//!    be diagnosed per row)
//! 2. Per row: resolve a track id by text search, then fetch the album-art
//!    URL from the track detail
//! 3. Catch every per-row fault at the row boundary so one bad row never
//!    aborts the batch
//! 4. Pace between rows to stay under upstream rate limits proactively

use std::sync::Arc;
use std::time::Duration;

use crate::dataset::Dataset;
use crate::enrichment::domain::{AccessToken, CatalogError, Credentials};
use crate::enrichment::http::{RequestExecutor, RetryPolicy};
use crate::enrichment::spotify::{SpotifyClient, TokenProvider};
use crate::enrichment::transport::{ReqwestTransport, Transport};

/// Configuration for the enrichment service
#[derive(Debug, Clone)]
pub struct EnrichmentConfig {
    /// Catalog API credentials
    pub credentials: Credentials,
    /// Retry behavior for catalog requests
    pub retry: RetryPolicy,
    /// Pause between rows that contacted the API
    pub row_delay: Duration,
}

impl EnrichmentConfig {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            retry: RetryPolicy::default(),
            row_delay: Duration::from_secs(1),
        }
    }
}

/// Outcome counts for one enrichment run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Rows that received an image URL
    pub enriched: usize,
    /// Rows the catalog had no match or no image for
    pub no_match: usize,
    /// Rows skipped for missing track or artist input
    pub missing_input: usize,
    /// Rows that failed with a catalog error
    pub failed: usize,
}

/// Service for enriching a song dataset with album-art URLs
pub struct EnrichmentService {
    config: EnrichmentConfig,
    auth: TokenProvider,
    catalog: SpotifyClient,
}

impl EnrichmentService {
    /// Create a service talking to the real catalog.
    pub fn new(config: EnrichmentConfig) -> Self {
        let transport: Arc<dyn Transport> = Arc::new(ReqwestTransport::new(config.retry.timeout));
        Self::with_transport(config, transport)
    }

    fn with_transport(config: EnrichmentConfig, transport: Arc<dyn Transport>) -> Self {
        let executor = RequestExecutor::new(transport.clone(), config.retry.clone());
        Self {
            auth: TokenProvider::new(transport),
            catalog: SpotifyClient::new(executor),
            config,
        }
    }

    /// Run the batch: token once, then row by row in dataset order.
    ///
    /// Returns the outcome counts; the caller persists the dataset. Only
    /// token acquisition can fail here - every per-row fault is recorded
    /// and converted into an absent image URL.
    pub async fn run(&self, dataset: &mut Dataset) -> Result<RunSummary, CatalogError> {
        let token = self.auth.fetch_token(&self.config.credentials).await?;

        let total = dataset.len();
        let mut summary = RunSummary::default();

        for row in 0..total {
            let contacted_api = self.enrich_row(dataset, row, &token, &mut summary).await;

            if (row + 1) % 10 == 0 {
                tracing::info!("processed {}/{} rows", row + 1, total);
            }

            // No pacing after rows that never reached the API, or after the
            // final row
            if contacted_api && row + 1 < total {
                tokio::time::sleep(self.config.row_delay).await;
            }
        }

        Ok(summary)
    }

    /// Resolve a single track and return its album-art URL.
    ///
    /// Acquires its own token; intended for one-off lookups.
    pub async fn lookup_track(
        &self,
        track: &str,
        artist: &str,
    ) -> Result<Option<String>, CatalogError> {
        let token = self.auth.fetch_token(&self.config.credentials).await?;
        self.lookup_image(track, artist, &token).await
    }

    /// Process one row; returns whether the API was contacted.
    async fn enrich_row(
        &self,
        dataset: &mut Dataset,
        row: usize,
        token: &AccessToken,
        summary: &mut RunSummary,
    ) -> bool {
        let track = dataset.track_name(row).map(str::to_owned);
        let artist = dataset.artist_name(row).map(str::to_owned);

        let (Some(track), Some(artist)) = (track, artist) else {
            tracing::warn!("row {row}: missing track or artist name, skipping");
            dataset.set_image_url(row, None);
            summary.missing_input += 1;
            return false;
        };

        match self.lookup_image(&track, &artist, token).await {
            Ok(Some(url)) => {
                dataset.set_image_url(row, Some(url));
                summary.enriched += 1;
            }
            Ok(None) => {
                tracing::info!("row {row}: no result for {track:?} by {artist:?}");
                dataset.set_image_url(row, None);
                summary.no_match += 1;
            }
            Err(e) => {
                // One row's failure never aborts the batch
                tracing::warn!("row {row}: failed to enrich {track:?} by {artist:?}: {e}");
                dataset.set_image_url(row, None);
                summary.failed += 1;
            }
        }
        true
    }

    async fn lookup_image(
        &self,
        track: &str,
        artist: &str,
        token: &AccessToken,
    ) -> Result<Option<String>, CatalogError> {
        let Some(track_id) = self.catalog.search_track(track, artist, token).await? else {
            return Ok(None);
        };
        self.catalog.track_image_url(&track_id, token).await
    }
}
