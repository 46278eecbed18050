//! OpenAI-compatible chat completions client.
//!
//! Covers the hosted OpenAI API, Ollama's /v1 compatibility endpoint, and
//! self-hosted gateways exposing the same wire format.

use crate::error::ApiError;
use crate::provider::{ChatMessage, CompletionOptions, ModelProviderClient};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

pub struct OpenAiChatClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

impl OpenAiChatClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        model: impl Into<String>,
    ) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| ApiError::ProviderError(format!("Failed to build HTTP client: {}", e)))?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self {
            http,
            base_url,
            api_key,
            model: model.into(),
        })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl ModelProviderClient for OpenAiChatClient {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        options: &CompletionOptions,
    ) -> Result<String, ApiError> {
        let mut body = json!({
            "model": self.model,
            "messages": messages,
        });
        if let Some(temperature) = options.temperature {
            body["temperature"] = json!(temperature);
        }
        if let Some(max_tokens) = options.max_tokens {
            body["max_tokens"] = json!(max_tokens);
        }
        if let Some(top_p) = options.top_p {
            body["top_p"] = json!(top_p);
        }

        let mut request = self.http.post(self.completions_url()).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        tracing::debug!(model = %self.model, url = %self.completions_url(), "sending completion request");
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(ApiError::ProviderError(format!(
                "Completion request failed with status {}: {}",
                status, detail
            )));
        }

        let parsed: ChatCompletionResponse = response.json().await?;
        let choice = parsed.choices.into_iter().next().ok_or_else(|| {
            ApiError::ProviderError("Completion response contained no choices".to_string())
        })?;
        choice.message.content.ok_or_else(|| {
            ApiError::ProviderError("Completion response contained no message content".to_string())
        })
    }

    fn model(&self) -> &str {
        &self.model
    }
}
