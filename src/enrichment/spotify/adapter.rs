//! Adapter layer: convert catalog DTOs to domain values.
//!
//! This is the ONLY place where DTO types become domain types. Structural
//! absence - no `tracks` block, an empty item list, an item without an id,
//! a track without an album - collapses to `None` here instead of turning
//! into an error: the catalog simply has nothing for us.

use super::dto;
use crate::enrichment::domain::TrackId;

/// Identifier of the first search hit, if any.
pub fn first_track_id(response: dto::SearchResponse) -> Option<TrackId> {
    response.tracks?.items.into_iter().next()?.id.map(TrackId)
}

/// URL of the first album image, if the album and a non-empty image list
/// are both present.
pub fn first_image_url(response: dto::TrackResponse) -> Option<String> {
    response.album?.images.into_iter().next().map(|image| image.url)
}
