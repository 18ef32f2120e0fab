//! Resilient request execution with rate-limit-aware retry.
//!
//! Every catalog GET goes through [`RequestExecutor`]: a 200 comes back
//! immediately, a 429 sleeps for the server's `Retry-After` and retries,
//! and any other status fails fast. Rate limiting is the only fault that
//! is transient by contract.

use std::sync::Arc;
use std::time::Duration;

use super::domain::{AccessToken, CatalogError};
use super::transport::{RawResponse, Transport};

/// Seconds to wait when a 429 carries no usable `Retry-After` header.
const DEFAULT_RETRY_AFTER: u64 = 1;

/// Retry behavior for catalog requests.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Per-request timeout, applied by the transport.
    pub timeout: Duration,
    /// Maximum request attempts, first attempt included. Must be at least 1.
    pub max_retries: u32,
    /// Duration of one `Retry-After` unit. One second in production; tests
    /// shrink it so retry scenarios run in milliseconds.
    pub retry_unit: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(60),
            max_retries: 3,
            retry_unit: Duration::from_secs(1),
        }
    }
}

/// Executes catalog GETs, retrying on rate limiting.
pub struct RequestExecutor {
    transport: Arc<dyn Transport>,
    policy: RetryPolicy,
}

impl RequestExecutor {
    pub fn new(transport: Arc<dyn Transport>, policy: RetryPolicy) -> Self {
        Self { transport, policy }
    }

    /// Issue an authorized GET.
    ///
    /// Returns the 200 response, [`CatalogError::Upstream`] for any other
    /// non-429 status, or [`CatalogError::RetryExhausted`] once every
    /// allowed attempt has been rate limited.
    pub async fn get(&self, url: &str, token: &AccessToken) -> Result<RawResponse, CatalogError> {
        let max_attempts = self.policy.max_retries.max(1);
        let mut attempts = 0;

        while attempts < max_attempts {
            let response = self.transport.get(url, Some(token.secret())).await?;
            attempts += 1;

            match response.status {
                200 => return Ok(response),
                429 => {
                    let wait = response.retry_after_secs().unwrap_or(DEFAULT_RETRY_AFTER);
                    tracing::warn!(
                        "rate limited, waiting {}s before retrying ({} of {} attempts used)",
                        wait,
                        attempts,
                        max_attempts
                    );
                    tokio::time::sleep(self.scaled(wait)).await;
                }
                status => {
                    return Err(CatalogError::Upstream {
                        status,
                        body: response.body,
                    });
                }
            }
        }

        Err(CatalogError::RetryExhausted { attempts })
    }

    fn scaled(&self, units: u64) -> Duration {
        self.policy
            .retry_unit
            .saturating_mul(u32::try_from(units).unwrap_or(u32::MAX))
    }
}
