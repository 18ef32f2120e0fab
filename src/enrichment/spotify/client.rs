//! Spotify catalog client: track search and track detail lookup.
//!
//! Both calls go through the retrying executor. Wire shapes stay in `dto`,
//! conversion to domain values in `adapter`; this file only builds URLs and
//! classifies outcomes.

use super::{adapter, dto};
use crate::enrichment::domain::{AccessToken, CatalogError, TrackId};
use crate::enrichment::http::RequestExecutor;

/// Default catalog API base
const DEFAULT_API_BASE: &str = "https://api.spotify.com/v1";

/// Catalog API client
pub struct SpotifyClient {
    executor: RequestExecutor,
    base_url: String,
}

impl SpotifyClient {
    pub fn new(executor: RequestExecutor) -> Self {
        Self {
            executor,
            base_url: DEFAULT_API_BASE.to_string(),
        }
    }

    /// Create a client for testing with a custom base URL.
    #[cfg(test)]
    pub fn with_base_url(executor: RequestExecutor, base_url: impl Into<String>) -> Self {
        Self {
            executor,
            base_url: base_url.into(),
        }
    }

    /// Resolve a track by free-text search, returning the first hit's id.
    ///
    /// `Ok(None)` means the catalog has no match - not an error. Executor
    /// failures (auth, rate-limit exhaustion, upstream faults) propagate
    /// unchanged.
    pub async fn search_track(
        &self,
        track: &str,
        artist: &str,
        token: &AccessToken,
    ) -> Result<Option<TrackId>, CatalogError> {
        let query = format!("{track} artist:{artist}");
        let url = format!(
            "{}/search?q={}&type=track",
            self.base_url,
            urlencoding::encode(&query)
        );

        let response = self.executor.get(&url, token).await?;
        let parsed: dto::SearchResponse = serde_json::from_str(&response.body)
            .map_err(|e| CatalogError::Parse(e.to_string()))?;
        Ok(adapter::first_track_id(parsed))
    }

    /// Fetch a track's album-art URL.
    ///
    /// `Ok(None)` when the track has no album block or the album has no
    /// images.
    pub async fn track_image_url(
        &self,
        track_id: &TrackId,
        token: &AccessToken,
    ) -> Result<Option<String>, CatalogError> {
        let url = format!("{}/tracks/{}", self.base_url, track_id.as_str());

        let response = self.executor.get(&url, token).await?;
        let parsed: dto::TrackResponse = serde_json::from_str(&response.body)
            .map_err(|e| CatalogError::Parse(e.to_string()))?;
        Ok(adapter::first_image_url(parsed))
    }
}
