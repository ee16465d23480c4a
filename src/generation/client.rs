//! Anthropic-backed generation client.
//!
//! Wraps one Messages API call per source script. The call blocks until a
//! response or failure is obtained; retry policy is a caller concern and no
//! retries happen here.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "ANTHROPIC_API_KEY";

/// Messages API endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.anthropic.com/v1/messages";

/// One call to the external generation service.
///
/// The pipeline depends on this trait rather than on a concrete client so
/// that tests can substitute a scripted double.
pub trait GenerationClient {
    /// Produce generated text for one unit of source text.
    ///
    /// `instruction` must be non-empty; its content is opaque to the caller.
    /// The returned text is trimmed, and an empty trimmed response is an
    /// error, never a success with empty content.
    fn generate(&self, instruction: &str, source_text: &str) -> Result<String, GenerationError>;
}

/// Failure modes of a generation call.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("no API key configured, set {API_KEY_ENV}")]
    MissingApiKey,

    #[error("instruction must not be empty")]
    EmptyInstruction,

    #[error("authentication rejected ({0})")]
    Auth(StatusCode),

    #[error("rate limited ({0})")]
    RateLimited(StatusCode),

    #[error("service returned error status {0}")]
    Api(StatusCode),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("empty response")]
    EmptyResponse,
}

/// Connection settings for [`AnthropicClient`].
#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// API endpoint
    pub endpoint: String,
    /// Model to use
    pub model: String,
    /// Maximum tokens per response
    pub max_tokens: u32,
    /// Temperature for generation
    pub temperature: f32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// API key (overrides the environment variable)
    pub api_key: Option<String>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: "claude-sonnet-4-5-20250929".to_string(),
            max_tokens: 1024,
            temperature: 0.3,
            timeout_secs: 30,
            api_key: std::env::var(API_KEY_ENV).ok(),
        }
    }
}

/// Anthropic API request body
#[derive(Debug, Serialize)]
struct AnthropicRequest {
    model: String,
    max_tokens: u32,
    temperature: f32,
    system: String,
    messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: String,
    content: String,
}

/// Anthropic API response body
#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    text: String,
}

/// Client for the Anthropic Messages API.
///
/// Owns its HTTP client and a single-thread runtime, so the synchronous
/// pipeline can issue one blocking call per file.
pub struct AnthropicClient {
    settings: ClientSettings,
    http: reqwest::Client,
    runtime: tokio::runtime::Runtime,
}

impl AnthropicClient {
    /// Create a client from connection settings.
    pub fn new(settings: ClientSettings) -> crate::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| crate::Error::Config(e.to_string()))?;

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        Ok(Self {
            settings,
            http,
            runtime,
        })
    }

    /// Create a client with an explicit API key.
    pub fn with_api_key(api_key: &str) -> crate::Result<Self> {
        Self::new(ClientSettings {
            api_key: Some(api_key.to_string()),
            ..ClientSettings::default()
        })
    }

    /// Check if an API key is configured
    pub fn is_configured(&self) -> bool {
        self.settings.api_key.is_some()
    }

    async fn request(&self, instruction: &str, source_text: &str) -> Result<String, GenerationError> {
        let api_key = self
            .settings
            .api_key
            .as_deref()
            .ok_or(GenerationError::MissingApiKey)?;

        let body = AnthropicRequest {
            model: self.settings.model.clone(),
            max_tokens: self.settings.max_tokens,
            temperature: self.settings.temperature,
            system: instruction.to_string(),
            messages: vec![Message {
                role: "user".to_string(),
                content: source_text.to_string(),
            }],
        };

        let response = self
            .http
            .post(&self.settings.endpoint)
            .header("x-api-key", api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(status_error(status));
        }

        let body: AnthropicResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::MalformedResponse(e.to_string()))?;

        let text = body
            .content
            .first()
            .ok_or_else(|| GenerationError::MalformedResponse("no content blocks".to_string()))?
            .text
            .clone();

        usable_text(&text)
    }
}

impl GenerationClient for AnthropicClient {
    fn generate(&self, instruction: &str, source_text: &str) -> Result<String, GenerationError> {
        if instruction.is_empty() {
            return Err(GenerationError::EmptyInstruction);
        }

        debug!(
            model = %self.settings.model,
            input_len = source_text.len(),
            "dispatching generation request"
        );

        self.runtime.block_on(self.request(instruction, source_text))
    }
}

/// Map a non-success HTTP status onto the failure taxonomy.
fn status_error(status: StatusCode) -> GenerationError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => GenerationError::Auth(status),
        StatusCode::TOO_MANY_REQUESTS => GenerationError::RateLimited(status),
        _ => GenerationError::Api(status),
    }
}

/// Trim raw model output and reject results that are empty once trimmed.
fn usable_text(raw: &str) -> Result<String, GenerationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Err(GenerationError::EmptyResponse)
    } else {
        Ok(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keyless_settings() -> ClientSettings {
        ClientSettings {
            api_key: None,
            ..ClientSettings::default()
        }
    }

    #[test]
    fn test_usable_text_trims_surrounding_whitespace() {
        let text = usable_text("\n  Feature: Login\n").unwrap();
        assert_eq!(text, "Feature: Login");
    }

    #[test]
    fn test_usable_text_keeps_interior_whitespace() {
        let text = usable_text("Feature: Login\n  Scenario: Valid user").unwrap();
        assert_eq!(text, "Feature: Login\n  Scenario: Valid user");
    }

    #[test]
    fn test_usable_text_rejects_empty_string() {
        assert!(matches!(usable_text(""), Err(GenerationError::EmptyResponse)));
    }

    #[test]
    fn test_usable_text_rejects_whitespace_only() {
        assert!(matches!(
            usable_text("  \n\t  "),
            Err(GenerationError::EmptyResponse)
        ));
    }

    #[test]
    fn test_status_error_maps_authentication_failures() {
        assert!(matches!(
            status_error(StatusCode::UNAUTHORIZED),
            GenerationError::Auth(_)
        ));
        assert!(matches!(
            status_error(StatusCode::FORBIDDEN),
            GenerationError::Auth(_)
        ));
    }

    #[test]
    fn test_status_error_maps_rate_limiting() {
        assert!(matches!(
            status_error(StatusCode::TOO_MANY_REQUESTS),
            GenerationError::RateLimited(_)
        ));
    }

    #[test]
    fn test_status_error_maps_other_statuses_to_api() {
        assert!(matches!(
            status_error(StatusCode::INTERNAL_SERVER_ERROR),
            GenerationError::Api(_)
        ));
        assert!(matches!(
            status_error(StatusCode::BAD_REQUEST),
            GenerationError::Api(_)
        ));
    }

    #[test]
    fn test_request_serialization() {
        let request = AnthropicRequest {
            model: "claude-sonnet-4-5-20250929".to_string(),
            max_tokens: 1024,
            temperature: 0.3,
            system: "Convert the test".to_string(),
            messages: vec![Message {
                role: "user".to_string(),
                content: "describe('login')".to_string(),
            }],
        };

        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("claude-sonnet-4-5-20250929"));
        assert!(json.contains("max_tokens"));
        assert!(json.contains("Convert the test"));
        assert!(json.contains("describe('login')"));
    }

    #[test]
    fn test_response_deserialization() {
        let json = r#"{"content":[{"text":"Feature: Login"}]}"#;
        let response: AnthropicResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.content[0].text, "Feature: Login");
    }

    #[test]
    fn test_default_settings() {
        let settings = ClientSettings {
            api_key: None,
            ..ClientSettings::default()
        };
        assert!(settings.endpoint.contains("anthropic.com"));
        assert_eq!(settings.max_tokens, 1024);
        assert_eq!(settings.temperature, 0.3);
        assert_eq!(settings.timeout_secs, 30);
    }

    #[test]
    fn test_client_with_api_key_is_configured() {
        let client = AnthropicClient::with_api_key("test-key").unwrap();
        assert!(client.is_configured());
    }

    #[test]
    fn test_client_without_api_key_is_not_configured() {
        let client = AnthropicClient::new(keyless_settings()).unwrap();
        assert!(!client.is_configured());
    }

    #[test]
    fn test_generate_rejects_empty_instruction_before_dispatch() {
        let client = AnthropicClient::with_api_key("test-key").unwrap();
        let result = client.generate("", "describe('login')");
        assert!(matches!(result, Err(GenerationError::EmptyInstruction)));
    }

    #[test]
    fn test_generate_without_api_key_fails_before_dispatch() {
        let client = AnthropicClient::new(keyless_settings()).unwrap();
        let result = client.generate("Convert the test", "describe('login')");
        assert!(matches!(result, Err(GenerationError::MissingApiKey)));
    }

    #[test]
    fn test_generation_error_messages_are_human_readable() {
        assert_eq!(GenerationError::EmptyResponse.to_string(), "empty response");
        assert!(GenerationError::MissingApiKey
            .to_string()
            .contains(API_KEY_ENV));
    }
}
