//! In-Memory Conversation Store
//!
//! Information Hiding:
//! - HashMap storage structure hidden from users
//! - Thread-safe access via RwLock hidden behind async interface
//! - Histories are bounded; oldest messages are evicted first

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Maximum number of messages retained per conversation
pub const MAX_HISTORY: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

/// Snapshot of store-wide counters, surfaced via the /stats command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreStats {
    pub active_conversations: usize,
    pub total_messages: usize,
}

/// Per-user conversation history, keyed by a platform-prefixed user id
/// (e.g. "tg-12345", "dc-98765") so native ids from different platforms
/// can never collide.
///
/// Data lives for the process lifetime only; a restart clears everything.
/// The number of distinct keys is unbounded (documented limitation).
pub struct ConversationStore {
    conversations: Arc<RwLock<HashMap<String, Vec<ChatMessage>>>>,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self {
            conversations: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Append a message to the history for `key`, creating the history if
    /// absent, then evict from the front until the bound holds.
    pub async fn append(&self, key: &str, message: ChatMessage) {
        let mut conversations = self.conversations.write().await;
        let history = conversations.entry(key.to_string()).or_default();
        history.push(message);
        while history.len() > MAX_HISTORY {
            history.remove(0);
        }
        tracing::debug!(
            "[ConversationStore] {} now holds {} message(s)",
            key,
            history.len()
        );
    }

    /// Remove the most recently appended message for `key`, if any.
    /// Used to roll back a user turn after a failed model call.
    /// No-op when the history is empty or the key is absent.
    pub async fn remove_last(&self, key: &str) {
        let mut conversations = self.conversations.write().await;
        if let Some(history) = conversations.get_mut(key) {
            history.pop();
        }
    }

    /// Current history for `key` as an owned snapshot. Empty if absent.
    pub async fn history(&self, key: &str) -> Vec<ChatMessage> {
        let conversations = self.conversations.read().await;
        conversations.get(key).cloned().unwrap_or_default()
    }

    /// Delete the entire history for `key`. No-op if absent.
    pub async fn clear(&self, key: &str) {
        let mut conversations = self.conversations.write().await;
        conversations.remove(key);
        tracing::debug!("[ConversationStore] Cleared history for {}", key);
    }

    pub async fn stats(&self) -> StoreStats {
        let conversations = self.conversations.read().await;
        StoreStats {
            active_conversations: conversations.len(),
            total_messages: conversations.values().map(|h| h.len()).sum(),
        }
    }
}

impl Default for ConversationStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_append_and_history() {
        let store = ConversationStore::new();
        store.append("tg-1", ChatMessage::user("Hello")).await;
        store.append("tg-1", ChatMessage::assistant("Hi there")).await;

        let history = store.history("tg-1").await;
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].content, "Hello");
        assert_eq!(history[1].content, "Hi there");
    }

    #[tokio::test]
    async fn test_history_bounded_fifo() {
        let store = ConversationStore::new();
        for i in 0..30 {
            store
                .append("tg-1", ChatMessage::user(format!("msg-{}", i)))
                .await;
            assert!(store.history("tg-1").await.len() <= MAX_HISTORY);
        }

        let history = store.history("tg-1").await;
        assert_eq!(history.len(), MAX_HISTORY);
        // Survivors are exactly the 20 most recent, in order
        for (offset, message) in history.iter().enumerate() {
            assert_eq!(message.content, format!("msg-{}", 10 + offset));
        }
    }

    #[tokio::test]
    async fn test_key_isolation() {
        let store = ConversationStore::new();
        store.append("tg-1", ChatMessage::user("A")).await;
        store.append("dc-1", ChatMessage::user("B")).await;
        store.append("tg-1", ChatMessage::user("A2")).await;

        assert_eq!(store.history("dc-1").await.len(), 1);
        assert_eq!(store.history("dc-1").await[0].content, "B");
        assert_eq!(store.history("tg-1").await.len(), 2);
    }

    #[tokio::test]
    async fn test_remove_last() {
        let store = ConversationStore::new();
        store.append("tg-1", ChatMessage::user("keep")).await;
        store.append("tg-1", ChatMessage::user("drop")).await;
        store.remove_last("tg-1").await;

        let history = store.history("tg-1").await;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].content, "keep");
    }

    #[tokio::test]
    async fn test_remove_last_empty_and_missing() {
        let store = ConversationStore::new();
        // Missing key must not panic
        store.remove_last("nope").await;

        store.append("tg-1", ChatMessage::user("only")).await;
        store.remove_last("tg-1").await;
        store.remove_last("tg-1").await; // now empty, still a no-op
        assert!(store.history("tg-1").await.is_empty());
    }

    #[tokio::test]
    async fn test_clear_idempotent() {
        let store = ConversationStore::new();
        store.append("tg-1", ChatMessage::user("bye")).await;

        store.clear("tg-1").await;
        store.clear("tg-1").await;
        store.clear("never-used").await;

        let stats = store.stats().await;
        assert_eq!(stats.active_conversations, 0);
        assert_eq!(stats.total_messages, 0);
    }

    #[tokio::test]
    async fn test_stats_consistency() {
        let store = ConversationStore::new();
        store.append("tg-1", ChatMessage::user("1")).await;
        store.append("tg-1", ChatMessage::assistant("2")).await;
        store.append("dc-9", ChatMessage::user("3")).await;

        let stats = store.stats().await;
        assert_eq!(stats.active_conversations, 2);
        assert_eq!(stats.total_messages, 3);

        store.clear("dc-9").await;
        let stats = store.stats().await;
        assert_eq!(stats.active_conversations, 1);
        assert_eq!(stats.total_messages, 2);
    }
}
