//! Internal domain models for catalog access.
//!
//! These types are OUR types - they don't change when the catalog API
//! changes. External API responses get converted into these via adapters.

/// Client credentials for the catalog's token endpoint.
///
/// Supplied at process start (flag, env var, or config file) and never
/// mutated afterwards.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Catalog application client id
    pub client_id: String,
    /// Catalog application client secret
    pub client_secret: String,
}

/// Bearer token obtained from the catalog's auth endpoint.
///
/// Opaque and single-use-per-run: fetched once before any catalog call,
/// never persisted, never refreshed.
#[derive(Debug, Clone)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Raw token value for the Authorization header.
    pub fn secret(&self) -> &str {
        &self.0
    }
}

/// Catalog identifier for a track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackId(pub String);

impl TrackId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TrackId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Errors that can occur while talking to the catalog
#[derive(Debug, Clone, thiserror::Error)]
pub enum CatalogError {
    /// Token exchange failed or returned malformed data. Fatal: an invalid
    /// token cannot be diagnosed per row.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Non-200, non-429 response. Not retried - these signal non-transient
    /// faults (bad request, server error, expired token).
    #[error("catalog returned HTTP {status}: {body}")]
    Upstream { status: u16, body: String },

    /// Rate-limit retries used up without a successful response.
    #[error("rate-limit retries exhausted after {attempts} attempts")]
    RetryExhausted { attempts: u32 },

    /// Connection failure, timeout, or other transport-level fault.
    #[error("network error: {0}")]
    Network(String),

    /// Response body did not match the expected shape.
    #[error("failed to parse response: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_error_display() {
        let err = CatalogError::Upstream {
            status: 503,
            body: "service unavailable".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("503"));
        assert!(msg.contains("service unavailable"));
    }

    #[test]
    fn test_retry_exhausted_display() {
        let err = CatalogError::RetryExhausted { attempts: 3 };
        assert!(err.to_string().contains("3 attempts"));
    }
}
