pub mod nemotron;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

pub use nemotron::NemotronClient;

/// Errors from the external inference endpoint.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("inference API key not configured")]
    MissingApiKey,

    #[error("invalid inference endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("upstream returned {status}: {body}")]
    Status { status: u16, body: String },
}

/// Narrow chat-completion interface so the hosted provider can be swapped.
///
/// Stateless: one call per request, no conversation memory, no retries.
/// The returned value is the upstream body verbatim.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    async fn chat_complete(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<Value, UpstreamError>;
}

#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Serialize)]
pub struct ChatMessage {
    pub role: String,
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
}
