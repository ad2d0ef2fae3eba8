//! Arctic Electric AI assistant bots.
//!
//! Telegram and Discord front-ends over a shared conversation store and
//! a single Anthropic Messages API client. Each user gets a bounded
//! per-platform conversation history; model failures are rolled back and
//! replaced with fixed fallback text so the bots never go silent.

pub mod branding;
pub mod channel;
mod config;
pub mod core;
pub mod knowledge;
pub mod utils;

pub mod cli;

pub use config::{DiscordConfig, LlmConfig, LoggingConfig, Settings, TelegramConfig};

pub use core::conversation::{ChatMessage, ConversationStore, StoreStats, MAX_HISTORY};
pub use core::llm::{AnthropicClient, GenerationOptions, LlmError};
pub use core::responder::{
    Responder, FALLBACK_AUTH, FALLBACK_GENERIC, FALLBACK_RATE_LIMITED,
};
