//! # rulecheck-runtime
//!
//! Completion client, retry policy, and check pipeline for rulecheck.
//!
//! This crate owns everything about a check that needs the network:
//! talking to the chat-completion API, retrying transient failures, and
//! turning a `CheckRequest` into a `Verdict`.
//!
//! ## Key Guarantees
//!
//! 1. **One seam**: all completion traffic goes through [`CompletionClient`]
//! 2. **Bounded retries**: one initial attempt plus at most five retries, with growing delays
//! 3. **No secret leakage**: API keys live in [`ApiCredential`] and show as `[REDACTED]` in Debug output
//!
//! ## Example
//!
//! ```rust,ignore
//! use rulecheck_core::CheckRequest;
//! use rulecheck_runtime::{OpenAiClient, RuleChecker};
//! use std::sync::Arc;
//!
//! let client = OpenAiClient::from_env()?;
//! let checker = RuleChecker::new(Arc::new(client));
//!
//! let request = CheckRequest {
//!     document: "Hello world".to_string(),
//!     rule: "Must contain a greeting".to_string(),
//! };
//! let verdict = checker.check(&request).await?;
//! ```

pub mod checker;
pub mod providers;
pub mod retry;

// Re-export main types at crate root
pub use checker::{CheckError, RuleChecker};
pub use providers::{
    ApiCredential, ChatCompletion, Choice, CompletionClient, CompletionMessage, CredentialSource,
    Model, OpenAiClient, ProviderError, Usage, OPENAI_API_KEY_ENV, OPENAI_BASE_URL_ENV,
};
pub use retry::{with_retry, RetryPolicy, RetryableError};
