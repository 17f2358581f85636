//! Completion response envelope
//!
//! Every call into the gateway resolves to a `CompletionEnvelope`: either
//! the parsed completion or a single typed error, never both.

use serde::{Deserialize, Serialize};

use crate::utils::error::GatewayError;

/// Token usage breakdown reported by the upstream service
///
/// Fields default to zero so a partial or missing usage object still
/// decodes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Total token count
    #[serde(default)]
    pub total_tokens: u32,
    /// Prompt token count
    #[serde(default)]
    pub prompt_tokens: u32,
    /// Completion token count
    #[serde(default)]
    pub completion_tokens: u32,
}

/// Parsed success payload of one completion call
#[derive(Debug, Clone)]
pub struct Completion {
    /// Raw text content from `choices[0].message.content`
    pub content: String,
    /// Token usage breakdown
    pub usage: TokenUsage,
    /// Full decoded response body
    pub raw: serde_json::Value,
}

/// Success/failure wrapper returned by every gateway call
#[derive(Debug)]
pub enum CompletionEnvelope {
    Success(Completion),
    Failure(GatewayError),
}

impl CompletionEnvelope {
    pub fn is_success(&self) -> bool {
        matches!(self, CompletionEnvelope::Success(_))
    }

    /// Text content on success, `None` on failure.
    pub fn content(&self) -> Option<&str> {
        match self {
            CompletionEnvelope::Success(completion) => Some(&completion.content),
            CompletionEnvelope::Failure(_) => None,
        }
    }

    /// Usage breakdown on success, `None` on failure.
    pub fn usage(&self) -> Option<&TokenUsage> {
        match self {
            CompletionEnvelope::Success(completion) => Some(&completion.usage),
            CompletionEnvelope::Failure(_) => None,
        }
    }

    /// The structured error on failure, `None` on success.
    pub fn error(&self) -> Option<&GatewayError> {
        match self {
            CompletionEnvelope::Success(_) => None,
            CompletionEnvelope::Failure(error) => Some(error),
        }
    }

    /// Unwrap into a plain `Result` for callers that prefer `?`.
    pub fn into_result(self) -> Result<Completion, GatewayError> {
        match self {
            CompletionEnvelope::Success(completion) => Ok(completion),
            CompletionEnvelope::Failure(error) => Err(error),
        }
    }
}
