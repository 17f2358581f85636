//! Data models module
//!
//! Defines the outbound request payload and the response envelope types.

use serde::{Deserialize, Serialize};

pub mod request;
pub mod response;

pub use request::{ChatMessage, CompletionRequest};
pub use response::{Completion, CompletionEnvelope, TokenUsage};

/// Upstream API error response body
///
/// Best-effort shape; 400 responses are parsed against this to extract a
/// human-readable message.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    /// Error message
    pub message: String,
    /// Error code (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<serde_json::Value>,
}
