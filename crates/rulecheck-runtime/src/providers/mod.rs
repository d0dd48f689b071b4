//! Completion provider abstractions for rulecheck-runtime.
//!
//! This module defines the trait for chat-completion backends, the wire
//! types they return, and the OpenAI implementation.
//!
//! ## Security
//!
//! All providers use the [`secrets`] module for secure credential handling.
//! See [`ApiCredential`] for the recommended patterns.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::retry::RetryableError;
use rulecheck_core::ChatMessage;

mod openai;
pub mod secrets;

pub use openai::{OpenAiClient, OPENAI_API_KEY_ENV, OPENAI_BASE_URL_ENV};
pub use secrets::{ApiCredential, CredentialSource};

/// Errors from completion providers.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    ParseError(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),
}

// Retry covers transport failures, throttling, and upstream outage.
// Other 4xx, undecodable bodies, and missing configuration fail at once.
impl RetryableError for ProviderError {
    fn is_retryable(&self) -> bool {
        match self {
            ProviderError::HttpError(_) => true,
            ProviderError::ApiError { status, .. } => *status == 429 || *status >= 500,
            ProviderError::ParseError(_) | ProviderError::NotConfigured(_) => false,
        }
    }
}

/// Chat model selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Model {
    /// `gpt-3.5-turbo`
    #[serde(rename = "gpt-3.5-turbo")]
    Gpt35Turbo,
    /// `gpt-4`
    #[serde(rename = "gpt-4")]
    Gpt4,
}

impl Model {
    /// Wire name of the model.
    pub fn as_str(&self) -> &'static str {
        match self {
            Model::Gpt35Turbo => "gpt-3.5-turbo",
            Model::Gpt4 => "gpt-4",
        }
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A chat completion as returned by the provider.
///
/// Parsed leniently: the fields the pipeline reads are typed, everything
/// unexpected is ignored rather than rejected.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletion {
    /// Completion id assigned by the provider
    pub id: String,

    /// Object tag, normally "chat.completion"
    pub object: String,

    /// Unix timestamp of creation
    pub created: u64,

    /// Generated choices; the pipeline only reads the first
    pub choices: Vec<Choice>,

    /// Token usage, zeroed when the provider omits it
    #[serde(default)]
    pub usage: Usage,
}

impl ChatCompletion {
    /// Content of the first choice.
    ///
    /// Empty content counts as missing, same as an absent field.
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .first()?
            .message
            .content
            .as_deref()
            .filter(|content| !content.is_empty())
    }
}

/// One generated choice within a completion.
#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    /// Position within the choices array
    pub index: u32,

    /// The generated message
    pub message: CompletionMessage,

    /// Why generation stopped, when reported
    pub finish_reason: Option<String>,
}

/// The message inside a choice.
///
/// Distinct from [`ChatMessage`]: this side of the wire is untrusted, so
/// the role is a free-form string and content may be absent.
#[derive(Debug, Clone, Deserialize)]
pub struct CompletionMessage {
    /// Role reported by the provider
    pub role: String,

    /// Generated text, absent for non-text completions
    #[serde(default)]
    pub content: Option<String>,
}

/// Token usage for a completion.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct Usage {
    /// Tokens in the prompt
    #[serde(default)]
    pub prompt_tokens: u32,

    /// Tokens in the completion
    #[serde(default)]
    pub completion_tokens: u32,

    /// Prompt plus completion tokens
    #[serde(default)]
    pub total_tokens: u32,
}

/// Provider abstraction allows swapping completion backends.
///
/// The check pipeline only ever talks to this trait; the concrete client
/// behind it is chosen once at startup.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Execute a chat completion.
    async fn create_chat_completion(
        &self,
        model: Model,
        messages: Vec<ChatMessage>,
    ) -> Result<ChatCompletion, ProviderError>;

    /// Provider name for logs.
    fn name(&self) -> &str;
}
