//! Retry orchestration
//!
//! Wraps the one-shot client in a bounded retry loop: transient failures
//! (rate limits, server errors, timeouts, network failures) are retried
//! with exponential backoff, everything else fails the call immediately.

use std::time::Duration;

use tracing::{debug, warn};

use crate::config::GatewaySettings;
use crate::models::request::{ChatMessage, CompletionRequest};
use crate::models::response::CompletionEnvelope;
use crate::services::client::OpenRouterClient;
use crate::utils::error::{GatewayError, GatewayResult};

/// Exponential backoff cap, in backoff units
const BACKOFF_CAP: u64 = 32;

/// Retry configuration
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum retry attempts beyond the first call
    pub max_retries: u32,
    /// Duration of one backoff unit. Production keeps the default of one
    /// second so waits are exactly `min(2^attempt, 32)` seconds; tests
    /// shrink it to compress wall-clock time without changing the
    /// arithmetic.
    pub backoff_unit: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            backoff_unit: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Exponential backoff for the given attempt: `min(2^attempt, 32)` units.
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        let units = 2u64.saturating_pow(attempt).min(BACKOFF_CAP);
        self.backoff_unit * units as u32
    }

    /// Wait before the next attempt after a rate limit: the server's
    /// Retry-After value when supplied, the exponential backoff otherwise.
    pub fn rate_limit_delay(&self, retry_after: Option<u64>, attempt: u32) -> Duration {
        match retry_after {
            Some(secs) => self.backoff_unit * secs as u32,
            None => self.backoff_delay(attempt),
        }
    }
}

/// Completion client with bounded retries
///
/// By the time a caller observes a `CompletionEnvelope` no error remains
/// in flight; the envelope carries the final outcome. There is no
/// cancellation primitive: one call holds the task for the full retry
/// duration, so callers wanting a hard deadline must impose it externally.
#[derive(Debug, Clone)]
pub struct RetryableOpenRouterClient {
    client: OpenRouterClient,
    policy: RetryPolicy,
}

impl RetryableOpenRouterClient {
    /// Create a retrying client. The retry budget comes from the settings
    /// unless an explicit policy overrides it.
    pub fn new(settings: GatewaySettings, policy: Option<RetryPolicy>) -> GatewayResult<Self> {
        let policy = policy.unwrap_or(RetryPolicy {
            max_retries: settings.max_retries,
            ..Default::default()
        });
        let client = OpenRouterClient::new(settings)?;

        Ok(Self { client, policy })
    }

    /// Create a retrying client from environment configuration.
    pub fn from_env() -> GatewayResult<Self> {
        let client = OpenRouterClient::from_env()?;
        let policy = RetryPolicy {
            max_retries: client.settings().max_retries,
            ..Default::default()
        };
        Ok(Self { client, policy })
    }

    /// Get inner client reference
    pub fn inner(&self) -> &OpenRouterClient {
        &self.client
    }

    /// Run one logical completion call through the retry loop.
    ///
    /// Rate limits wait for the server-suggested duration when available;
    /// server/timeout/network errors back off exponentially, capped at 32
    /// units. Any other error fails the envelope immediately — including
    /// response-parsing failures, which are deliberately not retried even
    /// though a transient truncation could plausibly warrant it.
    pub async fn generate(&self, request: &CompletionRequest) -> CompletionEnvelope {
        let mut attempt: u32 = 0;
        let mut last_error: Option<GatewayError> = None;

        while attempt <= self.policy.max_retries {
            match self.client.complete(request).await {
                Ok(completion) => return CompletionEnvelope::Success(completion),
                Err(error @ GatewayError::RateLimit { .. }) => {
                    let retry_after = error.retry_after_secs();
                    if attempt >= self.policy.max_retries {
                        last_error = Some(error);
                        break;
                    }
                    let wait = self.policy.rate_limit_delay(retry_after, attempt);
                    warn!(
                        attempt = attempt + 1,
                        kind = error.kind(),
                        error = %error,
                        wait_ms = wait.as_millis() as u64,
                        "rate limited, waiting before retry"
                    );
                    last_error = Some(error);
                    tokio::time::sleep(wait).await;
                    attempt += 1;
                }
                Err(error) if error.is_retryable() => {
                    if attempt >= self.policy.max_retries {
                        last_error = Some(error);
                        break;
                    }
                    let wait = self.policy.backoff_delay(attempt);
                    warn!(
                        attempt = attempt + 1,
                        kind = error.kind(),
                        error = %error,
                        wait_ms = wait.as_millis() as u64,
                        "transient failure, retrying"
                    );
                    last_error = Some(error);
                    tokio::time::sleep(wait).await;
                    attempt += 1;
                }
                Err(error) => {
                    debug!(kind = error.kind(), error = %error, "permanent failure, not retrying");
                    return CompletionEnvelope::Failure(error);
                }
            }
        }

        CompletionEnvelope::Failure(last_error.unwrap_or_else(|| GatewayError::Server {
            status: 500,
            message: "Retry attempts exhausted".to_string(),
        }))
    }

    /// Probe the upstream service with a minimal request.
    ///
    /// Never errors: any failure, retryable or not, reports `false`.
    pub async fn test_connection(&self) -> bool {
        let request = CompletionRequest::new(
            vec![ChatMessage::user("test")],
            serde_json::json!({
                "type": "object",
                "properties": {"status": {"type": "string"}},
                "required": ["status"],
                "additionalProperties": false
            }),
        )
        .with_max_tokens(100);

        let envelope = self.generate(&request).await;
        if !envelope.is_success() {
            if let Some(error) = envelope.error() {
                warn!(kind = error.kind(), error = %error, "connection test failed");
            }
        }
        envelope.is_success()
    }
}
