use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::LlmConfig;
use crate::core::conversation::ChatMessage;

const ANTHROPIC_API_BASE: &str = "https://api.anthropic.com";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Failure taxonomy for the model call. The responder maps each category
/// to a fixed user-facing fallback string.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("rate limited by upstream API")]
    RateLimited,
    #[error("authentication rejected by upstream API")]
    Auth,
    #[error("API error {status}: {body}")]
    Api { status: StatusCode, body: String },
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("response contained no text content")]
    EmptyResponse,
}

/// Per-call overrides for the generation defaults.
#[derive(Debug, Clone, Default)]
pub struct GenerationOptions {
    pub model: Option<String>,
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: &'a [ChatMessage],
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

fn first_text_block(response: MessagesResponse) -> Option<String> {
    response
        .content
        .into_iter()
        .find(|block| block.kind == "text")
        .map(|block| block.text)
}

/// Thin client for the Anthropic Messages API. One request per call,
/// no retries; failures surface as a classified [`LlmError`].
pub struct AnthropicClient {
    client: Client,
    api_key: String,
    base_url: String,
    config: LlmConfig,
}

impl AnthropicClient {
    pub fn new(api_key: String, config: LlmConfig) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: ANTHROPIC_API_BASE.to_string(),
            config,
        }
    }

    /// Point the client at a different endpoint. Used by tests to target
    /// a local mock server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Send the system prompt plus role-tagged history and return the
    /// first text segment of the reply.
    pub async fn complete(
        &self,
        system: &str,
        messages: &[ChatMessage],
        options: &GenerationOptions,
    ) -> Result<String, LlmError> {
        let model = options.model.as_deref().unwrap_or(&self.config.model);
        let max_tokens = options.max_tokens.unwrap_or(self.config.max_tokens);

        let request = MessagesRequest {
            model,
            max_tokens,
            system,
            messages,
        };

        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(LlmError::RateLimited);
        }
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(LlmError::Auth);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api { status, body });
        }

        let body = response.json::<MessagesResponse>().await?;

        // The service may return multiple content blocks; only the first
        // text block is used as the reply.
        first_text_block(body).ok_or(LlmError::EmptyResponse)
    }
}
