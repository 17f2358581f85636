//! Service layer module
//!
//! Contains the one-shot HTTP client and the retry orchestrator.

pub mod client;
pub mod retry;

pub use client::OpenRouterClient;
pub use retry::{RetryPolicy, RetryableOpenRouterClient};
