//! Spotify Web API Data Transfer Objects
//!
//! These types match EXACTLY what the API returns.
//! DO NOT add fields that aren't in the API response.
//! DO NOT use these types outside the spotify module - convert to domain
//! values via the adapter.
//!
//! API Reference: https://developer.spotify.com/documentation/web-api
//!
//! Every nesting level the enrichment flow walks is optional here: a
//! missing block deserializes to `None`/empty instead of failing, so the
//! adapter can collapse structural absence to "no result".

use serde::{Deserialize, Serialize};

/// `POST /api/token` response
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TokenResponse {
    /// Bearer token for subsequent catalog calls
    pub access_token: String,
}

/// `GET /search?type=track` response
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SearchResponse {
    /// Track results; absent when the query matched nothing at all
    #[serde(default)]
    pub tracks: Option<TrackPage>,
}

/// Paged list of search hits
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TrackPage {
    #[serde(default)]
    pub items: Vec<TrackItem>,
}

/// One search hit
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TrackItem {
    /// Catalog track identifier
    #[serde(default)]
    pub id: Option<String>,
}

/// `GET /tracks/<id>` response
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TrackResponse {
    /// Album block; absent for tracks without album data
    #[serde(default)]
    pub album: Option<Album>,
}

/// Album block within a track detail response
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Album {
    /// Cover images, largest first
    #[serde(default)]
    pub images: Vec<Image>,
}

/// One album image entry
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Image {
    /// Direct URL to the image
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_response_deserializes() {
        let json = r#"{
            "tracks": {
                "href": "https://api.spotify.com/v1/search?query=x",
                "items": [
                    {"id": "abc123", "name": "Blinding Lights", "popularity": 90}
                ],
                "total": 1
            }
        }"#;

        let parsed: SearchResponse = serde_json::from_str(json).unwrap();
        let tracks = parsed.tracks.unwrap();
        assert_eq!(tracks.items.len(), 1);
        assert_eq!(tracks.items[0].id.as_deref(), Some("abc123"));
    }

    #[test]
    fn test_search_response_tolerates_missing_blocks() {
        let parsed: SearchResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.tracks.is_none());

        let parsed: SearchResponse = serde_json::from_str(r#"{"tracks": {}}"#).unwrap();
        assert!(parsed.tracks.unwrap().items.is_empty());
    }

    #[test]
    fn test_track_response_deserializes() {
        let json = r#"{
            "id": "abc123",
            "name": "Blinding Lights",
            "album": {
                "name": "After Hours",
                "images": [
                    {"url": "https://img/640.jpg", "width": 640, "height": 640},
                    {"url": "https://img/300.jpg", "width": 300, "height": 300}
                ]
            }
        }"#;

        let parsed: TrackResponse = serde_json::from_str(json).unwrap();
        let album = parsed.album.unwrap();
        assert_eq!(album.images.len(), 2);
        assert_eq!(album.images[0].url, "https://img/640.jpg");
    }

    #[test]
    fn test_track_response_without_album() {
        let parsed: TrackResponse = serde_json::from_str(r#"{"id": "abc123"}"#).unwrap();
        assert!(parsed.album.is_none());
    }

    #[test]
    fn test_image_without_url_is_a_parse_error() {
        let result: Result<TrackResponse, _> =
            serde_json::from_str(r#"{"album": {"images": [{"width": 640}]}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_token_response_requires_access_token() {
        let parsed: TokenResponse =
            serde_json::from_str(r#"{"access_token": "tok", "token_type": "Bearer", "expires_in": 3600}"#)
                .unwrap();
        assert_eq!(parsed.access_token, "tok");

        let malformed: Result<TokenResponse, _> =
            serde_json::from_str(r#"{"token_type": "Bearer"}"#);
        assert!(malformed.is_err());
    }
}
