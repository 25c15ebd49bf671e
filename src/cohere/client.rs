use std::time::Duration;

use anyhow::{Error, Result, anyhow, bail};
use async_trait::async_trait;
use serde_json::Value;

use super::{ChatProvider, CompletionRequest};

// Upper bound on a single HTTP exchange. The relay enforces its own,
// much shorter, deadline; this only makes sure calls it abandoned
// eventually finish.
const TRANSPORT_TIMEOUT: Duration = Duration::from_secs(60);

/// Client for the Cohere v1 chat API.
#[derive(Clone, Debug)]
pub struct CohereClient {
    api_hostname: String,
    api_key: String,
    http: reqwest::Client,
}

impl CohereClient {
    /// Fails when no usable API key is given, in which case the chat
    /// relay runs without a provider.
    pub fn new(api_hostname: &str, api_key: Option<&str>) -> Result<Self, Error> {
        let api_key = api_key
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or(anyhow!("COHERE_API_KEY environment variable not set"))?;
        let http = reqwest::Client::builder()
            .timeout(TRANSPORT_TIMEOUT)
            .build()?;

        Ok(Self {
            api_hostname: api_hostname.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            http,
        })
    }
}

#[async_trait]
impl ChatProvider for CohereClient {
    async fn chat(&self, request: &CompletionRequest) -> Result<String, Error> {
        let url = format!("{}/v1/chat", self.api_hostname);
        tracing::debug!(
            "Sending chat request to {} with {} history entries",
            url,
            request.chat_history.len()
        );

        let response = self
            .http
            .post(url)
            .bearer_auth(&self.api_key)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!("Cohere API returned {}: {}", status, body);
        }

        let resp: Value = response.json().await?;
        let text = resp["text"]
            .as_str()
            .ok_or(anyhow!("No text in Cohere response: {}", resp))?;

        Ok(text.to_string())
    }
}
