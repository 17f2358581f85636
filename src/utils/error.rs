//! Error handling module
//!
//! Defines the typed error taxonomy for the gateway client. Each variant
//! carries a fixed retryability classification; the retry orchestrator
//! consults `is_retryable` and nothing else second-guesses it.

use thiserror::Error;

/// Gateway error types
///
/// The retryable set is exactly: rate limits, server errors, timeouts and
/// network failures. Authentication, client, parsing and configuration
/// errors are permanent.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Invalid or rejected credential (HTTP 401)
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Rate limit exceeded (HTTP 429)
    #[error("Rate limit exceeded: {message}")]
    RateLimit {
        message: String,
        /// Server-suggested wait in seconds, from the Retry-After header
        retry_after: Option<u64>,
    },

    /// Upstream server error (HTTP 5xx)
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Connection or read timeout
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// DNS resolution or connection failure
    #[error("Network error: {0}")]
    Network(String),

    /// Malformed or schema-violating response body
    #[error("Failed to parse response: {0}")]
    ResponseParsing(String),

    /// Other client-side rejection (4xx except 401/429)
    #[error("Client error ({status}): {message}")]
    Client { status: u16, message: String },

    /// Missing or invalid configuration, raised before any request is sent
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl GatewayError {
    /// Whether the retry orchestrator may attempt the call again.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            GatewayError::RateLimit { .. }
                | GatewayError::Server { .. }
                | GatewayError::Timeout(_)
                | GatewayError::Network(_)
        )
    }

    /// Server-suggested wait in seconds, if the upstream provided one.
    pub fn retry_after_secs(&self) -> Option<u64> {
        match self {
            GatewayError::RateLimit { retry_after, .. } => *retry_after,
            _ => None,
        }
    }

    /// Map an HTTP status code to its error variant.
    ///
    /// 2xx codes are not errors and must not be passed here; they are
    /// handled by the success-parsing path.
    pub fn from_status(status: u16, message: impl Into<String>, retry_after: Option<u64>) -> Self {
        let message = message.into();
        match status {
            401 => GatewayError::Authentication(if message.is_empty() {
                "Invalid API key".to_string()
            } else {
                message
            }),
            429 => GatewayError::RateLimit {
                message: if message.is_empty() {
                    "Too many requests".to_string()
                } else {
                    message
                },
                retry_after,
            },
            500..=599 => GatewayError::Server { status, message },
            _ => GatewayError::Client { status, message },
        }
    }

    /// Stable identifier used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            GatewayError::Authentication(_) => "authentication_error",
            GatewayError::RateLimit { .. } => "rate_limit_error",
            GatewayError::Server { .. } => "server_error",
            GatewayError::Timeout(_) => "timeout_error",
            GatewayError::Network(_) => "network_error",
            GatewayError::ResponseParsing(_) => "response_parsing_error",
            GatewayError::Client { .. } => "client_error",
            GatewayError::Configuration(_) => "configuration_error",
        }
    }
}

/// Translate transport-level failures so raw reqwest errors never reach
/// callers: timeouts map to `Timeout`, everything else to `Network`.
impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GatewayError::Timeout(err.to_string())
        } else if err.is_connect() {
            GatewayError::Network(format!("Connection failed: {}", err))
        } else {
            GatewayError::Network(err.to_string())
        }
    }
}

/// Result type alias
pub type GatewayResult<T> = Result<T, GatewayError>;
