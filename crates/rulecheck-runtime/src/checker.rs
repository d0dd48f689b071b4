//! The check pipeline: request in, verdict out.
//!
//! [`RuleChecker`] owns the sequence every check follows: build the
//! prompt, run the completion with retries, read the first choice, parse
//! the verdict. It holds no per-request state, so one instance serves
//! all concurrent requests.

use crate::providers::{CompletionClient, Model, ProviderError};
use crate::retry::{with_retry, RetryPolicy};
use rulecheck_core::{check_prompt, CheckRequest, Verdict, VerdictError};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Errors from running a check end to end.
#[derive(Error, Debug)]
pub enum CheckError {
    /// The provider failed after the retry budget was spent.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// The completion succeeded but carried no usable content.
    #[error("completion contained no message content")]
    MissingContent,

    /// The completion content was not a well-formed verdict.
    #[error(transparent)]
    Verdict(#[from] VerdictError),
}

/// Runs document/rule checks against a completion backend.
pub struct RuleChecker {
    provider: Arc<dyn CompletionClient>,
    model: Model,
    retry: RetryPolicy,
}

impl fmt::Debug for RuleChecker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleChecker")
            .field("provider", &self.provider.name())
            .field("model", &self.model)
            .field("retry", &self.retry)
            .finish()
    }
}

impl RuleChecker {
    /// Create a checker with the default model and retry policy.
    pub fn new(provider: Arc<dyn CompletionClient>) -> Self {
        Self {
            provider,
            model: Model::Gpt4,
            retry: RetryPolicy::default(),
        }
    }

    /// Use a different model.
    pub fn with_model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    /// Use a different retry policy.
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Check a document against a rule.
    ///
    /// Failures surface as [`CheckError`] without being softened into a
    /// verdict: a broken provider and a failing document are different
    /// outcomes.
    pub async fn check(&self, request: &CheckRequest) -> Result<Verdict, CheckError> {
        let messages = check_prompt(&request.rule, &request.document);

        let completion = with_retry(&self.retry, || {
            self.provider
                .create_chat_completion(self.model, messages.clone())
        })
        .await?;

        tracing::debug!(
            provider = self.provider.name(),
            prompt_tokens = completion.usage.prompt_tokens,
            completion_tokens = completion.usage.completion_tokens,
            "completion finished"
        );

        let content = completion
            .first_content()
            .ok_or(CheckError::MissingContent)?;

        Ok(Verdict::from_model_output(content)?)
    }
}
