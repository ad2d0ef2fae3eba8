//! Discord front-end.
//!
//! Receives messages over the Gateway WebSocket (Hello -> Identify ->
//! heartbeat -> MESSAGE_CREATE) and sends replies via the REST API.
//! The bot answers direct messages, @mentions, and slash-style text
//! commands; everything else in guild channels is ignored.

use anyhow::{anyhow, Context, Result};
use futures::{SinkExt, StreamExt};
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tracing::{debug, error, info, warn};

use crate::channel::chunk::split_message;
use crate::channel::commands::CommandRouter;
use crate::config::DiscordConfig;

const DISCORD_API_BASE: &str = "https://discord.com/api/v10";

/// Intents: GUILDS (1) | GUILD_MESSAGES (512) | DIRECT_MESSAGES (4096)
/// | MESSAGE_CONTENT (32768)
const GATEWAY_INTENTS: u64 = 1 | 512 | 4096 | 32768;

/// Matches `<@123>` and `<@!123>` user-mention markup
static MENTION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<@!?\d+>").expect("valid regex"));

pub struct DiscordBot {
    client: Client,
    token: String,
    config: DiscordConfig,
    router: Arc<CommandRouter>,
}

impl DiscordBot {
    pub fn new(token: String, config: DiscordConfig, router: Arc<CommandRouter>) -> Self {
        Self {
            client: Client::new(),
            token,
            config,
            router,
        }
    }

    async fn send_chunked(&self, channel_id: &str, text: &str) -> Result<()> {
        for chunk in split_message(text, self.config.max_message_len) {
            let response = self
                .client
                .post(format!(
                    "{}/channels/{}/messages",
                    DISCORD_API_BASE, channel_id
                ))
                .header("Authorization", format!("Bot {}", self.token))
                .json(&json!({ "content": chunk }))
                .send()
                .await?;

            if !response.status().is_success() {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                warn!("[Discord] Send failed ({}): {}", status, body);
            }
        }
        Ok(())
    }

    async fn trigger_typing(&self, channel_id: &str) {
        let result = self
            .client
            .post(format!("{}/channels/{}/typing", DISCORD_API_BASE, channel_id))
            .header("Authorization", format!("Bot {}", self.token))
            .send()
            .await;
        if let Err(e) = result {
            debug!("[Discord] Typing indicator failed: {}", e);
        }
    }

    async fn fetch_gateway_url(&self) -> Result<String> {
        let response = self
            .client
            .get(format!("{}/gateway/bot", DISCORD_API_BASE))
            .header("Authorization", format!("Bot {}", self.token))
            .send()
            .await
            .context("Failed to get Discord gateway URL")?;

        let body: Value = response.json().await?;
        let url = body["url"]
            .as_str()
            .context("Missing 'url' in gateway response")?;
        Ok(format!("{}/?v=10&encoding=json", url))
    }

    async fn handle_message_create(self: Arc<Self>, data: Value, bot_user_id: String) {
        if data["author"]["bot"].as_bool() == Some(true) {
            return;
        }

        let content = data["content"].as_str().unwrap_or("").trim().to_string();
        if content.is_empty() {
            return;
        }

        let channel_id = data["channel_id"].as_str().unwrap_or("").to_string();
        let author_id = data["author"]["id"].as_str().unwrap_or("").to_string();
        if channel_id.is_empty() || author_id.is_empty() {
            return;
        }

        let is_dm = data.get("guild_id").and_then(Value::as_str).is_none();
        let is_mentioned = mentions_user(&data, &bot_user_id);
        let is_command = content.starts_with('/');
        if !is_dm && !is_mentioned && !is_command {
            return;
        }

        let mut text = MENTION_RE.replace_all(&content, "").trim().to_string();
        if text.is_empty() {
            text = "Hello! Tell me about Arctic Electric.".to_string();
        }

        let author_name = data["author"]["username"].as_str().unwrap_or(&author_id);
        info!(
            "[Discord] Chat from {}: {}",
            author_name,
            text.chars().take(80).collect::<String>()
        );

        self.trigger_typing(&channel_id).await;

        let key = format!("dc-{}", author_id);
        let reply = self.router.handle(&key, &text).await;

        if let Err(e) = self.send_chunked(&channel_id, &reply).await {
            error!("[Discord] Failed to send reply: {}", e);
        }
    }

    /// One Gateway session: identify, heartbeat, and dispatch events until
    /// the connection drops.
    async fn run_session(self: &Arc<Self>) -> Result<()> {
        let gateway_url = self.fetch_gateway_url().await?;
        info!("[Discord] Connecting to gateway: {}", gateway_url);

        let (ws_stream, _) = tokio_tungstenite::connect_async(&gateway_url)
            .await
            .context("Failed to connect to Discord gateway")?;
        let (ws_write, mut ws_read) = ws_stream.split();

        // Hello (opcode 10) carries the heartbeat interval
        let heartbeat_interval = match ws_read.next().await {
            Some(Ok(msg)) => {
                let text = msg.to_text().unwrap_or("{}");
                let payload: Value = serde_json::from_str(text).unwrap_or_default();
                if payload["op"].as_u64() == Some(10) {
                    payload["d"]["heartbeat_interval"].as_u64().unwrap_or(41_250)
                } else {
                    warn!("[Discord] Expected Hello (op 10), got: {}", text);
                    41_250
                }
            }
            _ => return Err(anyhow!("No Hello from Discord gateway")),
        };
        debug!("[Discord] Heartbeat interval: {}ms", heartbeat_interval);

        let identify = json!({
            "op": 2,
            "d": {
                "token": self.token,
                "intents": GATEWAY_INTENTS,
                "properties": {
                    "os": "linux",
                    "browser": "arcticbot",
                    "device": "arcticbot"
                }
            }
        });

        let ws_write = Arc::new(tokio::sync::Mutex::new(ws_write));
        ws_write
            .lock()
            .await
            .send(WsMessage::Text(identify.to_string().into()))
            .await
            .context("Failed to send Identify")?;

        let alive = Arc::new(AtomicBool::new(true));
        let _session_guard = scopeguard::guard(alive.clone(), |flag| {
            flag.store(false, Ordering::SeqCst);
        });

        // Heartbeat task
        let hb_write = ws_write.clone();
        let hb_alive = alive.clone();
        tokio::spawn(async move {
            let mut interval =
                tokio::time::interval(Duration::from_millis(heartbeat_interval));
            loop {
                interval.tick().await;
                if !hb_alive.load(Ordering::SeqCst) {
                    break;
                }
                let heartbeat = json!({ "op": 1, "d": null });
                let mut writer = hb_write.lock().await;
                if let Err(e) = writer
                    .send(WsMessage::Text(heartbeat.to_string().into()))
                    .await
                {
                    warn!("[Discord] Heartbeat failed: {}", e);
                    break;
                }
            }
        });

        let mut bot_user_id = String::new();

        while let Some(msg_result) = ws_read.next().await {
            let msg = match msg_result {
                Ok(m) => m,
                Err(e) => {
                    warn!("[Discord] WebSocket error: {}", e);
                    break;
                }
            };

            let text = match msg.to_text() {
                Ok(t) => t,
                Err(_) => continue,
            };

            let payload: Value = match serde_json::from_str(text) {
                Ok(v) => v,
                Err(_) => continue,
            };

            match payload["t"].as_str() {
                Some("READY") => {
                    bot_user_id = payload["d"]["user"]["id"]
                        .as_str()
                        .unwrap_or_default()
                        .to_string();
                    let tag = payload["d"]["user"]["username"].as_str().unwrap_or("?");
                    info!("[Discord] Logged in as {}", tag);
                }
                Some("MESSAGE_CREATE") => {
                    let data = payload["d"].clone();
                    // Handle concurrently so one slow model call does not
                    // stall gateway reads (heartbeats run separately)
                    tokio::spawn(
                        self.clone()
                            .handle_message_create(data, bot_user_id.clone()),
                    );
                }
                _ => {}
            }
        }

        Err(anyhow!("Discord gateway connection ended"))
    }

    /// Run the gateway with reconnect-on-disconnect until shutdown.
    pub async fn run(self: Arc<Self>) -> Result<()> {
        loop {
            if let Err(e) = self.run_session().await {
                error!("[Discord] Session ended: {}", e);
            }
            tokio::time::sleep(Duration::from_secs(5)).await;
            info!("[Discord] Reconnecting to gateway");
        }
    }
}

fn mentions_user(data: &Value, user_id: &str) -> bool {
    if user_id.is_empty() {
        return false;
    }
    data["mentions"]
        .as_array()
        .map(|mentions| {
            mentions
                .iter()
                .any(|m| m["id"].as_str() == Some(user_id))
        })
        .unwrap_or(false)
}
