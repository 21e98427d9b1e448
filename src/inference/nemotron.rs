use async_trait::async_trait;
use serde_json::Value;
use url::Url;

use super::{ChatCompletionRequest, ChatMessage, ChatProvider, UpstreamError};
use crate::config::InferenceConfig;

/// Chat-completion client for the hosted Nemotron endpoint (OpenAI-style
/// `chat/completions` API). Model, sampling parameters, and credentials are
/// fixed at construction from configuration.
pub struct NemotronClient {
    http: reqwest::Client,
    endpoint: Url,
    api_key: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl NemotronClient {
    pub fn new(config: &InferenceConfig) -> Result<Self, UpstreamError> {
        Ok(Self {
            http: reqwest::Client::new(),
            endpoint: Url::parse(&config.api_url)?,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }
}

#[async_trait]
impl ChatProvider for NemotronClient {
    async fn chat_complete(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<Value, UpstreamError> {
        if self.api_key.is_empty() {
            return Err(UpstreamError::MissingApiKey);
        }

        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::system(system_prompt),
                ChatMessage::user(user_message),
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let response = self
            .http
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body,
            });
        }

        // Relay the upstream body verbatim; its shape is not ours to check.
        Ok(response.json::<Value>().await?)
    }
}
