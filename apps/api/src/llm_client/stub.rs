//! Scripted `CompletionClient` for tests. Replies are consumed in order and
//! every call is recorded, so tests can assert call counts and ordering.

use std::collections::VecDeque;
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use super::{CompletionClient, MessageSequence, ModelConfig, ProviderError};

pub enum StubReply {
    Text(String),
    Provider(ProviderError),
    /// A failure that is not a `ProviderError`.
    Other(String),
    /// Never resolves.
    Hang,
}

impl StubReply {
    pub fn text(text: &str) -> Self {
        StubReply::Text(text.to_string())
    }

    pub fn api_error(status: u16, message: &str) -> Self {
        StubReply::Provider(ProviderError::Api {
            status,
            message: message.to_string(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub messages: MessageSequence,
    pub model: String,
    pub temperature: f32,
    pub credential: String,
}

pub struct StubCompletionClient {
    replies: Mutex<VecDeque<StubReply>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl StubCompletionClient {
    pub fn new(replies: Vec<StubReply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl CompletionClient for StubCompletionClient {
    async fn complete(&self, messages: &MessageSequence, config: &ModelConfig) -> Result<String> {
        self.calls.lock().unwrap().push(RecordedCall {
            messages: messages.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
            credential: config.credential.expose().to_string(),
        });

        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            Some(StubReply::Text(text)) => Ok(text),
            Some(StubReply::Provider(err)) => Err(err.into()),
            Some(StubReply::Other(detail)) => Err(anyhow!(detail)),
            Some(StubReply::Hang) => {
                std::future::pending::<()>().await;
                Err(anyhow!("unreachable"))
            }
            None => Err(anyhow!("stub script exhausted")),
        }
    }
}
