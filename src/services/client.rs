//! HTTP client service
//!
//! Encapsulates exactly one HTTP round trip per call against the
//! completion endpoint and classifies the outcome into a typed error or a
//! parsed completion.

use std::time::Duration;

use reqwest::{Client, Response};
use tracing::debug;

use crate::config::GatewaySettings;
use crate::models::request::CompletionRequest;
use crate::models::response::{Completion, TokenUsage};
use crate::models::ApiErrorBody;
use crate::utils::error::{GatewayError, GatewayResult};
use crate::utils::logging::request_log_summary;

/// OpenRouter completion client
#[derive(Debug, Clone)]
pub struct OpenRouterClient {
    client: Client,
    settings: GatewaySettings,
}

impl OpenRouterClient {
    /// Create a new client instance.
    ///
    /// Fails fast with a configuration error when no credential is
    /// available, before any request is sent.
    pub fn new(settings: GatewaySettings) -> GatewayResult<Self> {
        if !settings.is_valid() {
            return Err(GatewayError::Configuration(
                "API key is missing or empty".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout))
            .connect_timeout(Duration::from_secs(settings.connect_timeout))
            .user_agent(concat!("itinerary-gateway/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GatewayError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, settings })
    }

    /// Create a client from environment configuration.
    pub fn from_env() -> GatewayResult<Self> {
        let settings = GatewaySettings::from_env()
            .map_err(|e| GatewayError::Configuration(e.to_string()))?;
        Self::new(settings)
    }

    pub fn settings(&self) -> &GatewaySettings {
        &self.settings
    }

    /// Perform one completion round trip.
    ///
    /// Transport failures are translated into `Timeout`/`Network`; HTTP
    /// statuses map onto the error taxonomy; 2xx bodies are parsed into a
    /// `Completion`.
    pub async fn complete(&self, request: &CompletionRequest) -> GatewayResult<Completion> {
        debug!(request = %request_log_summary(request), "sending completion request");

        let response = self
            .client
            .post(&self.settings.base_url)
            .header("Authorization", format!("Bearer {}", self.settings.api_key))
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Classify the HTTP status and parse the body accordingly.
    async fn handle_response(&self, response: Response) -> GatewayResult<Completion> {
        let status = response.status();

        if status.is_success() {
            let body = response.text().await?;
            return self.parse_success_body(&body);
        }

        match status.as_u16() {
            401 => Err(GatewayError::from_status(401, "Invalid API key", None)),
            429 => {
                let retry_after = parse_retry_after(&response);
                Err(GatewayError::from_status(429, "Too many requests", retry_after))
            }
            400 => {
                // Pull a human-readable message out of the error body when
                // possible; the result is a client error either way.
                let body = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<ApiErrorBody>(&body)
                    .map(|parsed| parsed.error.message)
                    .unwrap_or_else(|_| "Bad request".to_string());
                Err(GatewayError::from_status(400, message, None))
            }
            code => {
                let message = status
                    .canonical_reason()
                    .unwrap_or("Unexpected response")
                    .to_string();
                Err(GatewayError::from_status(code, message, None))
            }
        }
    }

    /// Decode a 2xx body into content, usage and the raw payload.
    fn parse_success_body(&self, body: &str) -> GatewayResult<Completion> {
        let raw: serde_json::Value = serde_json::from_str(body).map_err(|e| {
            // Truncated upstream responses show up here; log enough of the
            // body to diagnose them.
            debug!(
                body_len = body.len(),
                body_prefix = %truncate(body, 500),
                "failed to decode completion body"
            );
            GatewayError::ResponseParsing(e.to_string())
        })?;

        let content = raw["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| {
                GatewayError::ResponseParsing("Missing content in response".to_string())
            })?
            .to_string();

        let usage: TokenUsage = raw
            .get("usage")
            .and_then(|u| serde_json::from_value(u.clone()).ok())
            .unwrap_or_default();

        debug!(
            total_tokens = usage.total_tokens,
            content_len = content.len(),
            "completion request succeeded"
        );

        Ok(Completion { content, usage, raw })
    }
}

/// Read the Retry-After header as whole seconds, if present.
fn parse_retry_after(response: &Response) -> Option<u64> {
    response
        .headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
}

fn truncate(s: &str, max_len: usize) -> &str {
    if s.len() > max_len {
        // Back off to a char boundary so slicing cannot panic.
        let mut end = max_len;
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        &s[..end]
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::request::ChatMessage;
    use serde_json::json;

    fn test_settings() -> GatewaySettings {
        GatewaySettings::new("sk-or-test-key")
    }

    #[test]
    fn test_client_creation() {
        let client = OpenRouterClient::new(test_settings());
        assert!(client.is_ok());
    }

    #[test]
    fn test_client_creation_without_credential() {
        let err = OpenRouterClient::new(GatewaySettings::new("")).unwrap_err();
        assert!(matches!(err, GatewayError::Configuration(_)));
    }

    #[test]
    fn test_parse_success_body() {
        let client = OpenRouterClient::new(test_settings()).unwrap();
        let body = json!({
            "choices": [{"message": {"content": "{\"city\":\"Lisbon\"}"}}],
            "usage": {"total_tokens": 10, "prompt_tokens": 6, "completion_tokens": 4}
        })
        .to_string();

        let completion = client.parse_success_body(&body).unwrap();
        assert_eq!(completion.content, "{\"city\":\"Lisbon\"}");
        assert_eq!(completion.usage.total_tokens, 10);
        assert_eq!(completion.usage.prompt_tokens, 6);
        assert!(completion.raw.get("choices").is_some());
    }

    #[test]
    fn test_parse_missing_content() {
        let client = OpenRouterClient::new(test_settings()).unwrap();
        let body = json!({"choices": [{"message": {}}], "usage": {}}).to_string();

        let err = client.parse_success_body(&body).unwrap_err();
        match err {
            GatewayError::ResponseParsing(msg) => {
                assert_eq!(msg, "Missing content in response")
            }
            other => panic!("expected parsing error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_malformed_body() {
        let client = OpenRouterClient::new(test_settings()).unwrap();
        let err = client.parse_success_body("{not json").unwrap_err();
        assert!(matches!(err, GatewayError::ResponseParsing(_)));
    }

    #[test]
    fn test_parse_missing_usage_defaults_to_zero() {
        let client = OpenRouterClient::new(test_settings()).unwrap();
        let body = json!({"choices": [{"message": {"content": "ok"}}]}).to_string();

        let completion = client.parse_success_body(&body).unwrap();
        assert_eq!(completion.usage.total_tokens, 0);
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        let s = "ééééé";
        let t = truncate(s, 3);
        assert!(t.len() <= 3);
        assert!(s.starts_with(t));
    }

    #[test]
    fn test_request_serializes_with_messages() {
        let request = CompletionRequest::new(
            vec![ChatMessage::user("3 days in Kyoto")],
            json!({"type": "object"}),
        );
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["messages"][0]["role"], "user");
        assert_eq!(value["response_format"]["type"], "json_schema");
    }
}
