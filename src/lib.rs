//! Itinerary Gateway Library
//!
//! A resilient client for an OpenRouter-compatible chat-completion API:
//! schema-constrained output requests, a typed error taxonomy, and a
//! bounded retry loop with rate-limit-aware exponential backoff.
//!
//! ```no_run
//! use itinerary_gateway::{
//!     ChatMessage, CompletionRequest, GatewaySettings, RetryableOpenRouterClient,
//! };
//!
//! # async fn run() -> anyhow::Result<()> {
//! let settings = GatewaySettings::new(std::env::var("OPENROUTER_API_KEY")?);
//! let client = RetryableOpenRouterClient::new(settings, None)?;
//!
//! let request = CompletionRequest::new(
//!     vec![ChatMessage::user("Plan 3 days in Lisbon")],
//!     serde_json::json!({"type": "object", "properties": {"days": {"type": "array"}}}),
//! );
//!
//! let envelope = client.generate(&request).await;
//! if let Some(content) = envelope.content() {
//!     println!("{content}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod models;
pub mod services;
pub mod utils;

// Re-export common types
pub use config::GatewaySettings;
pub use models::request::{ChatMessage, CompletionRequest};
pub use models::response::{Completion, CompletionEnvelope, TokenUsage};
pub use services::{OpenRouterClient, RetryPolicy, RetryableOpenRouterClient};
pub use utils::error::{GatewayError, GatewayResult};
pub use utils::logging::init_logging;

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Library description
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Get version information
pub fn version_info() -> String {
    format!("{} v{} - {}", NAME, VERSION, DESCRIPTION)
}
