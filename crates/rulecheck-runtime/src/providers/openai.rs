//! OpenAI chat-completions client.
//!
//! ## Security
//!
//! This client uses the centralized [`ApiCredential`] system for secure
//! credential handling. See the [`secrets`](super::secrets) module for
//! details.

use super::{
    secrets::{ApiCredential, CredentialSource},
    ChatCompletion, CompletionClient, Model, ProviderError,
};
use async_trait::async_trait;
use rulecheck_core::ChatMessage;
use serde::Serialize;

/// Environment variable name for the OpenAI API key.
pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Environment variable for overriding the API base URL.
pub const OPENAI_BASE_URL_ENV: &str = "OPENAI_BASE_URL";

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// OpenAI chat-completions client.
///
/// One client holds one reqwest connection pool; clone-free sharing goes
/// through `Arc<dyn CompletionClient>`. No request timeout is set, so a
/// call waits as long as the upstream keeps the connection open.
///
/// # Security
///
/// The API key is stored using [`ApiCredential`] which:
/// - Cannot be accidentally printed via `Debug` or `Display`
/// - Is zeroed on drop (defense in depth against memory scraping)
/// - Must be explicitly exposed via `.expose()` when needed
pub struct OpenAiClient {
    credential: ApiCredential,
    base_url: String,
    http: reqwest::Client,
}

impl std::fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("credential", &self.credential)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl OpenAiClient {
    /// Create a new client with an explicit API key.
    ///
    /// # Security
    ///
    /// The API key is immediately wrapped in an [`ApiCredential`] and cannot
    /// be accidentally logged or printed after construction.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            credential: ApiCredential::new(
                api_key,
                CredentialSource::Programmatic,
                "OpenAI API key",
            ),
            base_url: DEFAULT_BASE_URL.to_string(),
            http: reqwest::Client::new(),
        }
    }

    /// Create from environment variables.
    ///
    /// Fails when `OPENAI_API_KEY` is not set; call this at startup so a
    /// missing key is caught before the first request arrives. Honors
    /// `OPENAI_BASE_URL` when set, which is how tests and proxies point
    /// the client elsewhere.
    pub fn from_env() -> Result<Self, ProviderError> {
        let credential = ApiCredential::from_env(OPENAI_API_KEY_ENV, "OpenAI API key")?;
        let base_url = std::env::var(OPENAI_BASE_URL_ENV)
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            credential,
            base_url,
            http: reqwest::Client::new(),
        })
    }

    /// Set a custom base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

/// OpenAI API request format.
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: Model,
    messages: &'a [ChatMessage],
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn create_chat_completion(
        &self,
        model: Model,
        messages: Vec<ChatMessage>,
    ) -> Result<ChatCompletion, ProviderError> {
        let request = ChatCompletionRequest {
            model,
            messages: &messages,
        };

        // SECURITY: Only expose the credential here, at the point of use
        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(self.credential.expose())
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::HttpError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<ChatCompletion>()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))
    }

    fn name(&self) -> &str {
        "openai"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = OpenAiClient::new("test-key");
        assert_eq!(client.name(), "openai");
        assert_eq!(client.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_with_base_url() {
        let client = OpenAiClient::new("test-key").with_base_url("http://127.0.0.1:9999/v1");
        assert_eq!(client.base_url, "http://127.0.0.1:9999/v1");
    }

    #[test]
    fn test_request_body_shape() {
        let messages = vec![ChatMessage::system("You are a linter.")];
        let request = ChatCompletionRequest {
            model: Model::Gpt4,
            messages: &messages,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-4");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][0]["content"], "You are a linter.");
        assert_eq!(json.as_object().unwrap().len(), 2);
    }

    // ==================== SECURITY TESTS ====================

    #[test]
    fn test_api_key_not_in_debug_output() {
        let secret_key = "sk-super-secret-key-12345";
        let client = OpenAiClient::new(secret_key);

        let debug_output = format!("{:?}", client);

        assert!(
            !debug_output.contains(secret_key),
            "API key was exposed in Debug output!"
        );
        assert!(
            debug_output.contains("[REDACTED]"),
            "Debug output should show [REDACTED]"
        );
    }

    #[test]
    fn test_from_env_requires_api_key() {
        std::env::remove_var(OPENAI_API_KEY_ENV);
        let result = OpenAiClient::from_env();

        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ProviderError::NotConfigured(_)));
        assert!(err.to_string().contains(OPENAI_API_KEY_ENV));
    }
}
