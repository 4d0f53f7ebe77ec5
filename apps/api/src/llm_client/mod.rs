//! LLM Client — the completion boundary for the tailoring pipeline.
//!
//! ARCHITECTURAL RULE: No other module may call the provider API directly.
//! Stages talk to a `CompletionClient`; production wires in `OpenAiClient`,
//! tests wire in the recording stub.
//!
//! One call is one prompt in, one text out. No retries happen here: a failed
//! call fails the stage that issued it.
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::models::Credential;

#[cfg(test)]
pub mod stub;

/// Default model for both completions.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
/// Sampling temperature shared by the tailoring and analysis calls.
pub const TEMPERATURE: f32 = 0.7;
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error("Completion did not finish within {secs}s")]
    Timeout { secs: u64 },
}

// ────────────────────────────────────────────────────────────────────────────
// Message sequence
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Ordered, role-tagged messages sent in one completion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageSequence(Vec<Message>);

impl MessageSequence {
    pub fn new(messages: Vec<Message>) -> Self {
        Self(messages)
    }

    pub fn messages(&self) -> &[Message] {
        &self.0
    }
}

#[cfg(test)]
impl MessageSequence {
    /// Content of the first message with the given role.
    pub fn content_of(&self, role: Role) -> Option<&str> {
        self.0
            .iter()
            .find(|m| m.role == role)
            .map(|m| m.content.as_str())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Model config
// ────────────────────────────────────────────────────────────────────────────

/// Per-invocation model settings. Built once per pipeline run and shared by
/// both stages of that run.
#[derive(Debug, Clone)]
pub struct ModelConfig {
    pub model: String,
    pub temperature: f32,
    pub credential: Credential,
    /// Deadline applied to every completion call made with this config.
    pub timeout: Duration,
}

impl ModelConfig {
    pub fn new(model: impl Into<String>, credential: Credential, timeout: Duration) -> Self {
        Self {
            model: model.into(),
            temperature: TEMPERATURE,
            credential,
            timeout,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Client trait
// ────────────────────────────────────────────────────────────────────────────

/// A single request/response exchange with a text-generation provider.
///
/// Implementations report provider-side failures as `ProviderError` inside the
/// `anyhow::Error`; anything else is treated by callers as unclassified.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, messages: &MessageSequence, config: &ModelConfig) -> Result<String>;
}

/// Runs one completion under `config.timeout`. An expired deadline surfaces as
/// `ProviderError::Timeout`; the in-flight request future is dropped.
pub async fn complete_with_deadline(
    client: &dyn CompletionClient,
    messages: &MessageSequence,
    config: &ModelConfig,
) -> Result<String> {
    match tokio::time::timeout(config.timeout, client.complete(messages, config)).await {
        Ok(result) => result,
        Err(_) => Err(ProviderError::Timeout {
            secs: config.timeout.as_secs(),
        }
        .into()),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// OpenAI-compatible chat completions client
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: &'a [Message],
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Chat-completions client. The credential travels with each `ModelConfig`
/// rather than living on the client, since every request may carry its own.
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    base_url: String,
}

impl OpenAiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    async fn send(
        &self,
        messages: &MessageSequence,
        config: &ModelConfig,
    ) -> Result<String, ProviderError> {
        let request_body = ChatCompletionRequest {
            model: &config.model,
            temperature: config.temperature,
            messages: messages.messages(),
        };

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(config.credential.expose())
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            // Prefer the provider's own message; fall back to the raw body
            let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ChatCompletionResponse = serde_json::from_str(&body)?;

        if let Some(usage) = &parsed.usage {
            debug!(
                "LLM call succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(ProviderError::EmptyContent)
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(&self, messages: &MessageSequence, config: &ModelConfig) -> Result<String> {
        Ok(self.send(messages, config).await?)
    }
}
