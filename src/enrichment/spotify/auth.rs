//! Token acquisition via the client-credentials grant.
//!
//! One POST per run. Auth failures are not rate limited in this design, so
//! the request bypasses the executor's retry loop and surfaces immediately.

use std::sync::Arc;

use super::dto;
use crate::enrichment::domain::{AccessToken, CatalogError, Credentials};
use crate::enrichment::transport::Transport;

/// Default auth endpoint base
const DEFAULT_AUTH_BASE: &str = "https://accounts.spotify.com";

/// Exchanges client credentials for a bearer token.
pub struct TokenProvider {
    transport: Arc<dyn Transport>,
    base_url: String,
}

impl TokenProvider {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            base_url: DEFAULT_AUTH_BASE.to_string(),
        }
    }

    /// Create a provider for testing with a custom base URL.
    #[cfg(test)]
    pub fn with_base_url(transport: Arc<dyn Transport>, base_url: impl Into<String>) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
        }
    }

    /// Fetch a fresh access token.
    ///
    /// Any non-200 response, or a 200 whose body lacks an `access_token`
    /// field, is a [`CatalogError::Auth`] - there is no per-row recovery
    /// from a token that never existed.
    pub async fn fetch_token(
        &self,
        credentials: &Credentials,
    ) -> Result<AccessToken, CatalogError> {
        let url = format!("{}/api/token", self.base_url);
        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", credentials.client_id.as_str()),
            ("client_secret", credentials.client_secret.as_str()),
        ];

        let response = self.transport.post_form(&url, &form).await?;

        if response.status != 200 {
            return Err(CatalogError::Auth(response.body));
        }

        let parsed: dto::TokenResponse = serde_json::from_str(&response.body)
            .map_err(|e| CatalogError::Auth(format!("malformed token response: {e}")))?;
        Ok(AccessToken::new(parsed.access_token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrichment::transport::mocks::{
        Recorded, ScriptedTransport, ok_json, rate_limited, status,
    };

    fn credentials() -> Credentials {
        Credentials {
            client_id: "id-123".to_string(),
            client_secret: "secret-456".to_string(),
        }
    }

    #[tokio::test]
    async fn test_fetch_token_posts_credentials_grant() {
        let transport = Arc::new(ScriptedTransport::new(vec![ok_json(
            r#"{"access_token": "tok-1", "token_type": "Bearer", "expires_in": 3600}"#,
        )]));
        let provider = TokenProvider::with_base_url(transport.clone(), "https://auth.test");

        let token = provider.fetch_token(&credentials()).await.unwrap();

        assert_eq!(token.secret(), "tok-1");
        assert_eq!(
            transport.requests(),
            vec![Recorded::PostForm {
                url: "https://auth.test/api/token".to_string(),
                form: vec![
                    ("grant_type".to_string(), "client_credentials".to_string()),
                    ("client_id".to_string(), "id-123".to_string()),
                    ("client_secret".to_string(), "secret-456".to_string()),
                ],
            }]
        );
    }

    #[tokio::test]
    async fn test_non_200_is_an_auth_error() {
        let transport = Arc::new(ScriptedTransport::new(vec![status(
            400,
            r#"{"error": "invalid_client"}"#,
        )]));
        let provider = TokenProvider::with_base_url(transport, "https://auth.test");

        let err = provider.fetch_token(&credentials()).await.unwrap_err();

        match err {
            CatalogError::Auth(body) => assert!(body.contains("invalid_client")),
            other => panic!("expected Auth, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_rate_limit_at_token_endpoint_is_not_retried() {
        let transport = Arc::new(ScriptedTransport::new(vec![
            rate_limited(Some("5")),
            ok_json(r#"{"access_token": "never-reached"}"#),
        ]));
        let provider = TokenProvider::with_base_url(transport.clone(), "https://auth.test");

        let err = provider.fetch_token(&credentials()).await.unwrap_err();

        assert!(matches!(err, CatalogError::Auth(_)));
        assert_eq!(transport.request_count(), 1);
    }

    #[tokio::test]
    async fn test_missing_access_token_field_is_an_auth_error() {
        let transport = Arc::new(ScriptedTransport::new(vec![ok_json(
            r#"{"token_type": "Bearer"}"#,
        )]));
        let provider = TokenProvider::with_base_url(transport, "https://auth.test");

        let err = provider.fetch_token(&credentials()).await.unwrap_err();

        match err {
            CatalogError::Auth(message) => assert!(message.contains("malformed token response")),
            other => panic!("expected Auth, got: {other:?}"),
        }
    }
}
