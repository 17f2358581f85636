//! Gateway configuration settings
//!
//! Explicitly constructed and injected into the client; configure once at
//! startup, read on every request. Concurrent reads are safe; mutating a
//! shared settings value after traffic has started is not supported.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Default completion endpoint
pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

/// Default read timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Default connection timeout in seconds
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Default maximum retry attempts
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Gateway client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewaySettings {
    /// API credential (required, non-empty)
    pub api_key: String,
    /// Completion endpoint URL
    pub base_url: String,
    /// Read timeout in seconds
    pub timeout: u64,
    /// Connection timeout in seconds
    pub connect_timeout: u64,
    /// Maximum retry attempts
    pub max_retries: u32,
}

impl GatewaySettings {
    /// Create settings with defaults for everything but the credential.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT_SECS,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Load settings from the environment.
    ///
    /// Reads `OPENROUTER_API_KEY` (required), `OPENROUTER_BASE_URL`,
    /// `OPENROUTER_TIMEOUT` and `OPENROUTER_MAX_RETRIES`. A `.env` file is
    /// loaded first if present.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        let settings = Self {
            api_key: std::env::var("OPENROUTER_API_KEY")
                .context("OPENROUTER_API_KEY environment variable not set")?,
            base_url: get_env_or_default("OPENROUTER_BASE_URL", DEFAULT_BASE_URL),
            timeout: get_env_or_default("OPENROUTER_TIMEOUT", "60")
                .parse()
                .context("Invalid timeout value")?,
            connect_timeout: get_env_or_default("OPENROUTER_CONNECT_TIMEOUT", "10")
                .parse()
                .context("Invalid connection timeout value")?,
            max_retries: get_env_or_default("OPENROUTER_MAX_RETRIES", "3")
                .parse()
                .context("Invalid maximum retries value")?,
        };

        settings.validate()?;

        Ok(settings)
    }

    /// Validate configuration validity
    fn validate(&self) -> Result<()> {
        if self.api_key.is_empty() {
            anyhow::bail!("API key cannot be empty");
        }

        if self.api_key.contains(char::is_whitespace) {
            anyhow::bail!("API key cannot contain whitespace characters");
        }

        if !self.base_url.starts_with("http") {
            anyhow::bail!("Invalid base URL format, should start with 'http'");
        }

        if self.timeout == 0 || self.connect_timeout == 0 {
            anyhow::bail!("Timeout values cannot be 0");
        }

        Ok(())
    }

    /// True only when the credential is non-empty.
    pub fn is_valid(&self) -> bool {
        !self.api_key.is_empty()
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: u64) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_connect_timeout(mut self, connect_timeout: u64) -> Self {
        self.connect_timeout = connect_timeout;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }
}

/// Get environment variable or default value
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
