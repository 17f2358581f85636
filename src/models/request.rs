//! Completion request payload
//!
//! Defines the outbound wire structures for a schema-constrained chat
//! completion request against an OpenRouter-compatible endpoint.

use serde::{Deserialize, Serialize};

/// Default model used when the caller does not pick one
pub const DEFAULT_MODEL: &str = "openai/gpt-4o-mini";

/// Default sampling temperature
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Default output token budget, sized generously for verbose structured output
pub const DEFAULT_MAX_TOKENS: u32 = 32000;

/// Fixed name the caller's schema is embedded under
pub const SCHEMA_NAME: &str = "response_schema";

/// Result cap requested from the web-search plugin
pub const WEB_PLUGIN_MAX_RESULTS: u32 = 5;

/// Single role/content message pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role (system/user/assistant)
    pub role: String,
    /// Message content
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

/// Schema-constrained response format directive
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseFormat {
    /// Format type, always "json_schema"
    #[serde(rename = "type")]
    pub format_type: String,
    /// Embedded schema definition
    pub json_schema: JsonSchemaFormat,
}

/// Named, strict JSON Schema wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonSchemaFormat {
    /// Schema name
    pub name: String,
    /// Strict mode flag
    pub strict: bool,
    /// Caller-supplied JSON Schema object
    pub schema: serde_json::Value,
}

/// Plugin directive attached to the request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginDirective {
    /// Plugin identifier
    pub id: String,
    /// Maximum number of search results
    pub max_results: u32,
}

impl PluginDirective {
    /// Web-search augmentation, used so the model can cite real places.
    pub fn web_search() -> Self {
        Self {
            id: "web".to_string(),
            max_results: WEB_PLUGIN_MAX_RESULTS,
        }
    }
}

/// Chat completion request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Model name
    pub model: String,
    /// Ordered message list
    pub messages: Vec<ChatMessage>,
    /// Schema-constrained output directive
    pub response_format: ResponseFormat,
    /// Sampling temperature
    pub temperature: f32,
    /// Maximum tokens to generate
    pub max_tokens: u32,
    /// Plugin directives (omitted when the model has built-in search)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plugins: Option<Vec<PluginDirective>>,
}

/// Whether the model name already implies web-search augmentation,
/// checked via the `:online` suffix and the `perplexity` substring.
pub fn model_has_builtin_search(model: &str) -> bool {
    model.ends_with(":online") || model.contains("perplexity")
}

fn web_plugins_for(model: &str) -> Option<Vec<PluginDirective>> {
    if model_has_builtin_search(model) {
        None
    } else {
        Some(vec![PluginDirective::web_search()])
    }
}

impl CompletionRequest {
    /// Build a request with default model, temperature and token budget.
    pub fn new(messages: Vec<ChatMessage>, schema: serde_json::Value) -> Self {
        let model = DEFAULT_MODEL.to_string();
        let plugins = web_plugins_for(&model);
        Self {
            model,
            messages,
            response_format: ResponseFormat {
                format_type: "json_schema".to_string(),
                json_schema: JsonSchemaFormat {
                    name: SCHEMA_NAME.to_string(),
                    strict: true,
                    schema,
                },
            },
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            plugins,
        }
    }

    /// Switch the model, recomputing the web-search plugin directive.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self.plugins = web_plugins_for(&self.model);
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builtin_search_detection() {
        assert!(model_has_builtin_search("openai/gpt-4o:online"));
        assert!(model_has_builtin_search("perplexity/sonar-pro"));
        assert!(model_has_builtin_search("perplexity/sonar:online"));
        assert!(!model_has_builtin_search("openai/gpt-4o-mini"));
        assert!(!model_has_builtin_search("anthropic/claude-3.5-sonnet"));
    }

    #[test]
    fn test_plugins_recomputed_on_model_change() {
        let req = CompletionRequest::new(vec![ChatMessage::user("hi")], json!({"type": "object"}));
        assert!(req.plugins.is_some());

        let req = req.with_model("perplexity/sonar");
        assert!(req.plugins.is_none());

        let req = req.with_model("openai/gpt-4o");
        assert!(req.plugins.is_some());
    }

    #[test]
    fn test_defaults() {
        let req = CompletionRequest::new(vec![], json!({}));
        assert_eq!(req.model, DEFAULT_MODEL);
        assert_eq!(req.temperature, DEFAULT_TEMPERATURE);
        assert_eq!(req.max_tokens, DEFAULT_MAX_TOKENS);
        assert_eq!(req.response_format.format_type, "json_schema");
        assert_eq!(req.response_format.json_schema.name, SCHEMA_NAME);
        assert!(req.response_format.json_schema.strict);
    }
}
