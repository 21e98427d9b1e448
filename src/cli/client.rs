use anyhow::{bail, Context, Result};
use serde_json::Value;

const DEFAULT_SERVER: &str = "http://127.0.0.1:8080";

/// Thin reqwest wrapper over the HUD API surface.
pub struct HudClient {
    http: reqwest::Client,
    base_url: String,
}

impl HudClient {
    pub fn new(server: Option<String>) -> Self {
        let base_url = server
            .or_else(|| std::env::var("HUD_API_URL").ok())
            .unwrap_or_else(|| DEFAULT_SERVER.to_string());

        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST /save_canvas with the write bearer token.
    pub async fn save_canvas(&self, payload: &Value, token: Option<String>) -> Result<Value> {
        let token = token
            .or_else(|| std::env::var("HUD_WRITE_TOKEN").ok())
            .context("no write token: pass --token or set HUD_WRITE_TOKEN")?;

        let response = self
            .http
            .post(format!("{}/save_canvas", self.base_url))
            .bearer_auth(token)
            .json(payload)
            .send()
            .await
            .with_context(|| format!("failed to reach {}", self.base_url))?;

        Self::into_envelope(response).await
    }

    /// GET helper for the read endpoints; empty query values are omitted.
    pub async fn get(&self, path: &str, query: &[(&str, Option<String>)]) -> Result<Value> {
        let pairs: Vec<(&str, String)> = query
            .iter()
            .filter_map(|(k, v)| v.clone().map(|v| (*k, v)))
            .collect();

        let response = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .query(&pairs)
            .send()
            .await
            .with_context(|| format!("failed to reach {}", self.base_url))?;

        Self::into_envelope(response).await
    }

    /// POST /query_nemotron and hand back whatever the model endpoint said.
    pub async fn query_gm(&self, message: &str) -> Result<Value> {
        let response = self
            .http
            .post(format!("{}/query_nemotron", self.base_url))
            .json(&serde_json::json!({ "message": message }))
            .send()
            .await
            .with_context(|| format!("failed to reach {}", self.base_url))?;

        Self::into_envelope(response).await
    }

    async fn into_envelope(response: reqwest::Response) -> Result<Value> {
        let status = response.status();
        let body: Value = response
            .json()
            .await
            .with_context(|| format!("server returned a non-JSON body (HTTP {})", status))?;

        if !status.is_success() {
            let message = body
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("no message");
            bail!("server returned HTTP {}: {}", status, message);
        }

        Ok(body)
    }
}
