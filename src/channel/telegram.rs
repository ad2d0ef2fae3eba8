//! Telegram front-end.
//!
//! Long-polls the Bot API (`getUpdates`) and answers every text message,
//! either via the shared command layer or the AI responder. Replies are
//! chunked to stay under the Telegram message-length limit.

use anyhow::{anyhow, Result};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::channel::chunk::split_message;
use crate::channel::commands::CommandRouter;
use crate::config::TelegramConfig;

const TELEGRAM_API_BASE: &str = "https://api.telegram.org/bot";
const API_TIMEOUT_SECS: u64 = 30;

pub struct TelegramBot {
    client: Client,
    token: String,
    config: TelegramConfig,
    router: Arc<CommandRouter>,
}

impl TelegramBot {
    pub fn new(token: String, config: TelegramConfig, router: Arc<CommandRouter>) -> Self {
        Self {
            client: Client::new(),
            token,
            config,
            router,
        }
    }

    fn api_url(&self, method: &str) -> String {
        format!("{}{}/{}", TELEGRAM_API_BASE, self.token, method)
    }

    async fn call<T: serde::de::DeserializeOwned>(
        &self,
        method: &str,
        params: serde_json::Value,
        timeout: Duration,
    ) -> Result<T> {
        let response = self
            .client
            .post(self.api_url(method))
            .json(&params)
            .timeout(timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("Telegram HTTP error: {}", body));
        }

        let body: TelegramResponse<T> = response.json().await?;
        if !body.ok {
            return Err(anyhow!(
                "Telegram API error: {}",
                body.description.unwrap_or_default()
            ));
        }
        body.result
            .ok_or_else(|| anyhow!("Telegram returned ok but no result"))
    }

    /// Validate the token by calling getMe.
    pub async fn me(&self) -> Result<TelegramUser> {
        self.call(
            "getMe",
            json!({}),
            Duration::from_secs(API_TIMEOUT_SECS),
        )
        .await
    }

    /// Publish the command menu shown in the Telegram UI.
    async fn set_my_commands(&self) -> Result<bool> {
        let commands = json!([
            { "command": "start", "description": "Welcome & quick menu" },
            { "command": "help", "description": "List all commands" },
            { "command": "ask", "description": "Ask the AI a question" },
            { "command": "patent", "description": "Patent status & claims" },
            { "command": "grants", "description": "Available grants & funding" },
            { "command": "status", "description": "Project status dashboard" },
            { "command": "company", "description": "Company overview" },
            { "command": "clear", "description": "Clear conversation history" },
        ]);
        self.call(
            "setMyCommands",
            json!({ "commands": commands }),
            Duration::from_secs(API_TIMEOUT_SECS),
        )
        .await
    }

    async fn poll_updates(&self, offset: i64) -> Result<Vec<TelegramUpdate>> {
        let params = json!({
            "offset": offset,
            "timeout": self.config.polling_timeout,
            "allowed_updates": ["message"],
        });
        self.call(
            "getUpdates",
            params,
            Duration::from_secs(self.config.polling_timeout as u64 + 10),
        )
        .await
    }

    async fn send_chunked(&self, chat_id: i64, text: &str) -> Result<()> {
        for chunk in split_message(text, self.config.max_message_len) {
            let params = json!({
                "chat_id": chat_id,
                "text": chunk,
                "parse_mode": "Markdown",
            });
            let sent: Result<TelegramMessageId> = self
                .call(
                    "sendMessage",
                    params,
                    Duration::from_secs(API_TIMEOUT_SECS),
                )
                .await;
            if sent.is_err() {
                // Markdown from the model may be malformed; retry plain
                let fallback = json!({ "chat_id": chat_id, "text": chunk });
                let _: TelegramMessageId = self
                    .call(
                        "sendMessage",
                        fallback,
                        Duration::from_secs(API_TIMEOUT_SECS),
                    )
                    .await?;
            }
        }
        Ok(())
    }

    async fn send_typing(&self, chat_id: i64) {
        let params = json!({ "chat_id": chat_id, "action": "typing" });
        let result: Result<bool> = self
            .call(
                "sendChatAction",
                params,
                Duration::from_secs(API_TIMEOUT_SECS),
            )
            .await;
        if let Err(e) = result {
            debug!("[Telegram] Typing indicator failed: {}", e);
        }
    }

    async fn handle_message(self: Arc<Self>, message: TelegramMessage) {
        let Some(from) = message.from else { return };
        let Some(text) = message.text else { return };
        let text = text.trim().to_string();
        if text.is_empty() {
            return;
        }

        let display_name = from.username.clone().unwrap_or_else(|| from.id.to_string());
        info!(
            "[Telegram] Message from {}: {}",
            display_name,
            text.chars().take(80).collect::<String>()
        );

        self.send_typing(message.chat.id).await;

        let key = format!("tg-{}", from.id);
        let reply = self.router.handle(&key, &text).await;

        if let Err(e) = self.send_chunked(message.chat.id, &reply).await {
            error!("[Telegram] Failed to send reply to {}: {}", display_name, e);
        }
    }

    /// Run the long-polling loop until the process shuts down.
    pub async fn run(self: Arc<Self>) -> Result<()> {
        let me = self.me().await?;
        info!(
            "[Telegram] Connected as @{}",
            me.username.as_deref().unwrap_or("unknown")
        );

        if let Err(e) = self.set_my_commands().await {
            warn!("[Telegram] Failed to publish command menu: {}", e);
        }

        let mut last_update_id: i64 = 0;
        loop {
            let offset = if last_update_id > 0 {
                last_update_id + 1
            } else {
                0
            };

            match self.poll_updates(offset).await {
                Ok(updates) => {
                    for update in updates {
                        last_update_id = last_update_id.max(update.update_id);
                        if let Some(message) = update.message {
                            // Handle concurrently so one slow model call
                            // does not stall the polling loop
                            tokio::spawn(self.clone().handle_message(message));
                        }
                    }
                }
                Err(e) => {
                    error!("[Telegram] Polling error: {}", e);
                    tokio::time::sleep(Duration::from_secs(5)).await;
                }
            }
        }
    }
}

// ============================================================================
// Telegram API Types
// ============================================================================

#[derive(Debug, Deserialize)]
struct TelegramResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TelegramUpdate {
    update_id: i64,
    message: Option<TelegramMessage>,
}

#[derive(Debug, Deserialize)]
struct TelegramMessage {
    from: Option<TelegramUser>,
    chat: TelegramChat,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TelegramUser {
    pub id: i64,
    pub username: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TelegramChat {
    id: i64,
}

#[derive(Debug, Deserialize)]
struct TelegramMessageId {
    #[allow(dead_code)]
    message_id: i64,
}
