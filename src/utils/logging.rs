//! Logging utilities
//!
//! Subscriber setup plus request summaries kept small enough to log.

use tracing::info;

use crate::models::request::CompletionRequest;

/// Initialize the logging system.
///
/// Level comes from `RUST_LOG` (default `info`); set `LOG_FORMAT=json`
/// for machine-readable output in production.
pub fn init_logging() {
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let subscriber: Box<dyn tracing::Subscriber + Send + Sync> = if log_format == "json" {
        Box::new(
            tracing_subscriber::fmt()
                .with_env_filter(log_level)
                .json()
                .with_current_span(false)
                .with_span_list(false)
                .finish(),
        )
    } else {
        Box::new(
            tracing_subscriber::fmt()
                .with_env_filter(log_level)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .finish(),
        )
    };

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");

    info!("Logging system initialized");
}

/// Truncate a string with a note about original length
fn truncate_content(s: &str, max_len: usize) -> String {
    if s.len() > max_len {
        let mut end = max_len;
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... ({} chars truncated)", &s[..end], s.len() - end)
    } else {
        s.to_string()
    }
}

/// Create a filtered summary of a completion request for debug logs.
/// Keeps the structure but truncates message contents and elides the
/// schema body, which can run to kilobytes for itinerary shapes.
pub fn request_log_summary(request: &CompletionRequest) -> serde_json::Value {
    let filtered_messages: Vec<serde_json::Value> = request
        .messages
        .iter()
        .map(|msg| {
            let max_len = if msg.role == "system" { 100 } else { 200 };
            serde_json::json!({
                "role": msg.role,
                "content": truncate_content(&msg.content, max_len),
            })
        })
        .collect();

    let schema_size = request
        .response_format
        .json_schema
        .schema
        .to_string()
        .len();

    serde_json::json!({
        "model": request.model,
        "max_tokens": request.max_tokens,
        "temperature": request.temperature,
        "messages": filtered_messages,
        "schema": format!("[...{} byte schema]", schema_size),
        "plugins": request.plugins.as_ref().map(|p| p.len()),
    })
}
