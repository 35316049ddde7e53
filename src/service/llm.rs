//! Shared LLM client and interaction utilities
//!
//! The analysis service talks to the model through [`CompletionProvider`] so the
//! provider can be swapped out in tests. [`LlmClient`] is the production
//! implementation backed by the Anthropic Messages API via rig-core.

use async_trait::async_trait;
use rig::client::CompletionClient as _;
use rig::completion::Prompt;
use rig::providers::anthropic;

/// A single-turn completion request
#[derive(Debug, Clone)]
pub struct CompletionRequest<'a> {
    pub model: &'a str,
    pub max_tokens: u64,
    /// Sent as the only user message
    pub prompt: &'a str,
}

/// Errors returned by the completion provider
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum LlmError {
    #[error("Failed to create LLM client: {0}")]
    ClientInit(String),

    #[error("LLM request failed: {0}")]
    RequestFailed(String),
}

/// Text completion backend
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Send one user message and return the completion text
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, LlmError>;
}

/// Shared LLM client wrapper
#[derive(Clone)]
pub struct LlmClient {
    client: anthropic::Client,
}

impl LlmClient {
    /// Create a new LLM client with the provided API key
    pub fn new(api_key: &str) -> Result<Self, LlmError> {
        let client = anthropic::Client::new(api_key)
            .map_err(|e| LlmError::ClientInit(e.to_string()))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl CompletionProvider for LlmClient {
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, LlmError> {
        let agent = self
            .client
            .agent(request.model)
            .max_tokens(request.max_tokens)
            .build();

        agent
            .prompt(request.prompt)
            .await
            .map_err(|e| LlmError::RequestFailed(e.to_string()))
    }
}
