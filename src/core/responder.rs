//! AI response orchestration.
//!
//! `respond()` is the single seam between the chat front-ends and the
//! model API: it records the user turn, issues one model call with the
//! bounded history, and records the reply. Failures never cross this
//! boundary -- the caller always gets displayable text, and the failed
//! user turn is rolled back so it leaves no trace in history.

use std::sync::Arc;

use crate::core::conversation::{ChatMessage, ConversationStore, StoreStats};
use crate::core::llm::{AnthropicClient, GenerationOptions, LlmError};
use crate::knowledge::SYSTEM_PROMPT;

pub const FALLBACK_RATE_LIMITED: &str =
    "⚠️ I'm receiving too many requests right now. Please try again in a moment.";
pub const FALLBACK_AUTH: &str =
    "⚠️ AI service authentication error. Please contact the administrator.";
pub const FALLBACK_GENERIC: &str =
    "⚠️ I encountered an error processing your request. Please try again.";

pub struct Responder {
    client: AnthropicClient,
    store: Arc<ConversationStore>,
}

impl Responder {
    pub fn new(client: AnthropicClient, store: Arc<ConversationStore>) -> Self {
        Self { client, store }
    }

    /// Respond with the default generation parameters.
    pub async fn respond(&self, key: &str, text: &str) -> String {
        self.respond_with(key, text, &GenerationOptions::default())
            .await
    }

    /// Append the user turn, call the model with the trimmed history, and
    /// append the reply. On failure the user turn is removed again and a
    /// fixed fallback string for the failure category is returned.
    pub async fn respond_with(
        &self,
        key: &str,
        text: &str,
        options: &GenerationOptions,
    ) -> String {
        self.store.append(key, ChatMessage::user(text)).await;
        let history = self.store.history(key).await;

        match self.client.complete(SYSTEM_PROMPT, &history, options).await {
            Ok(reply) => {
                self.store
                    .append(key, ChatMessage::assistant(reply.clone()))
                    .await;
                reply
            }
            Err(error) => {
                tracing::error!("[Responder] Model call failed for {}: {}", key, error);
                self.store.remove_last(key).await;
                fallback_for(&error).to_string()
            }
        }
    }

    pub async fn clear_history(&self, key: &str) {
        self.store.clear(key).await;
    }

    pub async fn stats(&self) -> StoreStats {
        self.store.stats().await
    }
}

fn fallback_for(error: &LlmError) -> &'static str {
    match error {
        LlmError::RateLimited => FALLBACK_RATE_LIMITED,
        LlmError::Auth => FALLBACK_AUTH,
        LlmError::Api { .. } | LlmError::Http(_) | LlmError::EmptyResponse => FALLBACK_GENERIC,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_fallback_mapping() {
        assert_eq!(fallback_for(&LlmError::RateLimited), FALLBACK_RATE_LIMITED);
        assert_eq!(fallback_for(&LlmError::Auth), FALLBACK_AUTH);
        assert_eq!(
            fallback_for(&LlmError::Api {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                body: String::new(),
            }),
            FALLBACK_GENERIC
        );
        assert_eq!(fallback_for(&LlmError::EmptyResponse), FALLBACK_GENERIC);
    }
}
