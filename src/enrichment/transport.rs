//! Transport layer for catalog HTTP calls.
//!
//! The [`Transport`] trait is the seam between the enrichment flow and the
//! real network. Production code uses [`ReqwestTransport`]; tests
//! substitute a scripted implementation (see [`mocks`]) so every retry and
//! failure path runs without a network.

use std::time::Duration;

use async_trait::async_trait;

use super::domain::CatalogError;

/// User agent sent with every request
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// A raw HTTP response reduced to what the executor needs.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status code
    pub status: u16,
    /// Raw `Retry-After` header value, if the server sent one
    pub retry_after: Option<String>,
    /// Response body as text
    pub body: String,
}

impl RawResponse {
    /// `Retry-After` as whole seconds. `None` when the header is absent or
    /// not an integer.
    pub fn retry_after_secs(&self) -> Option<u64> {
        self.retry_after.as_deref().and_then(|v| v.trim().parse().ok())
    }
}

/// Async HTTP operations the enrichment flow needs.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue a GET, optionally with a bearer token.
    async fn get(&self, url: &str, bearer: Option<&str>) -> Result<RawResponse, CatalogError>;

    /// Issue a form-encoded POST.
    async fn post_form(
        &self,
        url: &str,
        form: &[(&str, &str)],
    ) -> Result<RawResponse, CatalogError>;
}

/// Production transport backed by reqwest.
///
/// The client is configured to:
/// - Accept gzip-compressed responses (reduces bandwidth)
/// - Send a User-Agent header identifying the application
/// - Time out each request after the configured duration
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport with the given per-request timeout.
    pub fn new(timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .gzip(true)
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .expect("Failed to build HTTP client");

        Self { client }
    }

    async fn read_response(response: reqwest::Response) -> Result<RawResponse, CatalogError> {
        let status = response.status().as_u16();
        let retry_after = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response
            .text()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        Ok(RawResponse {
            status,
            retry_after,
            body,
        })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, url: &str, bearer: Option<&str>) -> Result<RawResponse, CatalogError> {
        let mut request = self.client.get(url);
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }
        let response = request
            .send()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;
        Self::read_response(response).await
    }

    async fn post_form(
        &self,
        url: &str,
        form: &[(&str, &str)],
    ) -> Result<RawResponse, CatalogError> {
        let response = self
            .client
            .post(url)
            .form(form)
            .send()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;
        Self::read_response(response).await
    }
}

/// Scripted transport for tests.
///
/// Replays a fixed queue of responses and records every request received,
/// so tests can assert on both sides of the conversation.
#[cfg(test)]
pub mod mocks {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;

    /// A request the scripted transport received.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Recorded {
        Get {
            url: String,
            bearer: Option<String>,
        },
        PostForm {
            url: String,
            form: Vec<(String, String)>,
        },
    }

    /// Transport that replays predefined responses in order.
    pub struct ScriptedTransport {
        responses: Mutex<VecDeque<RawResponse>>,
        requests: Mutex<Vec<Recorded>>,
    }

    impl ScriptedTransport {
        pub fn new(responses: Vec<RawResponse>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                requests: Mutex::new(Vec::new()),
            }
        }

        /// Everything the transport has been asked so far.
        pub fn requests(&self) -> Vec<Recorded> {
            self.requests.lock().unwrap().clone()
        }

        pub fn request_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }

        fn next_response(&self) -> Result<RawResponse, CatalogError> {
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| CatalogError::Network("scripted transport: no responses left".into()))
        }
    }

    #[async_trait]
    impl Transport for ScriptedTransport {
        async fn get(&self, url: &str, bearer: Option<&str>) -> Result<RawResponse, CatalogError> {
            self.requests.lock().unwrap().push(Recorded::Get {
                url: url.to_string(),
                bearer: bearer.map(str::to_string),
            });
            self.next_response()
        }

        async fn post_form(
            &self,
            url: &str,
            form: &[(&str, &str)],
        ) -> Result<RawResponse, CatalogError> {
            self.requests.lock().unwrap().push(Recorded::PostForm {
                url: url.to_string(),
                form: form
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            });
            self.next_response()
        }
    }

    /// 200 with a JSON body
    pub fn ok_json(body: &str) -> RawResponse {
        RawResponse {
            status: 200,
            retry_after: None,
            body: body.to_string(),
        }
    }

    /// 429 with an optional Retry-After value
    pub fn rate_limited(retry_after: Option<&str>) -> RawResponse {
        RawResponse {
            status: 429,
            retry_after: retry_after.map(str::to_string),
            body: String::new(),
        }
    }

    /// Arbitrary status with a body
    pub fn status(status: u16, body: &str) -> RawResponse {
        RawResponse {
            status,
            retry_after: None,
            body: body.to_string(),
        }
    }
}
