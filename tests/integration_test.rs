//! Integration tests for the responder pipeline.
//!
//! The Anthropic endpoint is replaced with a local wiremock server, so
//! these run without API keys or network access.

use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use arcticbot::{
    AnthropicClient, ConversationStore, LlmConfig, Responder, FALLBACK_AUTH, FALLBACK_GENERIC,
    FALLBACK_RATE_LIMITED, MAX_HISTORY,
};

fn reply_body(text: &str) -> serde_json::Value {
    json!({
        "content": [{ "type": "text", "text": text }]
    })
}

fn build_responder(base_url: &str) -> (Responder, Arc<ConversationStore>) {
    let client = AnthropicClient::new(
        "test-key".to_string(),
        LlmConfig {
            model: "claude-sonnet-4-20250514".to_string(),
            max_tokens: 1024,
        },
    )
    .with_base_url(base_url);
    let store = Arc::new(ConversationStore::new());
    (Responder::new(client, store.clone()), store)
}

#[tokio::test]
async fn test_successful_exchange_records_both_turns() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(header("x-api-key", "test-key"))
        .and(header("anthropic-version", "2023-06-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(reply_body("Hi! ❄️")))
        .mount(&mock_server)
        .await;

    let (responder, store) = build_responder(&mock_server.uri());

    let reply = responder.respond("tg-42", "Hello").await;
    assert_eq!(reply, "Hi! ❄️");

    let history = store.history("tg-42").await;
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].role, "user");
    assert_eq!(history[0].content, "Hello");
    assert_eq!(history[1].role, "assistant");
    assert_eq!(history[1].content, "Hi! ❄️");
}

#[tokio::test]
async fn test_long_conversation_stays_bounded_fifo() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(reply_body("ack")))
        .mount(&mock_server)
        .await;

    let (responder, store) = build_responder(&mock_server.uri());

    for i in 1..=25 {
        let reply = responder.respond("tg-1", &format!("question-{}", i)).await;
        assert_eq!(reply, "ack");
        assert!(store.history("tg-1").await.len() <= MAX_HISTORY);
    }

    // 25 exchanges of 2 messages each, trimmed to the 10 most recent
    let history = store.history("tg-1").await;
    assert_eq!(history.len(), MAX_HISTORY);
    assert_eq!(history[0].role, "user");
    assert_eq!(history[0].content, "question-16");
    assert_eq!(history[19].role, "assistant");
    assert_eq!(history[19].content, "ack");
}

#[tokio::test]
async fn test_rate_limit_returns_fallback_and_rolls_back() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(reply_body("recovered")))
        .mount(&mock_server)
        .await;

    let (responder, store) = build_responder(&mock_server.uri());

    let reply = responder.respond("dc-7", "first try").await;
    assert_eq!(reply, FALLBACK_RATE_LIMITED);
    // The failed user turn must leave no trace
    assert!(store.history("dc-7").await.is_empty());

    let reply = responder.respond("dc-7", "second try").await;
    assert_eq!(reply, "recovered");

    let history = store.history("dc-7").await;
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].content, "second try");
}

#[tokio::test]
async fn test_auth_failure_returns_admin_fallback() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;

    let (responder, store) = build_responder(&mock_server.uri());

    let reply = responder.respond("tg-9", "hello").await;
    assert_eq!(reply, FALLBACK_AUTH);
    assert!(store.history("tg-9").await.is_empty());
}

#[tokio::test]
async fn test_server_error_preserves_prior_history() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(reply_body("fine")))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&mock_server)
        .await;

    let (responder, store) = build_responder(&mock_server.uri());

    responder.respond("tg-5", "seed").await;
    let before = store.history("tg-5").await;
    assert_eq!(before.len(), 2);

    let reply = responder.respond("tg-5", "doomed").await;
    assert_eq!(reply, FALLBACK_GENERIC);

    // Rollback removed only the failed user turn
    let after = store.history("tg-5").await;
    assert_eq!(after, before);
}

#[tokio::test]
async fn test_empty_content_is_generic_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "content": [] })))
        .mount(&mock_server)
        .await;

    let (responder, store) = build_responder(&mock_server.uri());

    let reply = responder.respond("tg-3", "anyone there?").await;
    assert_eq!(reply, FALLBACK_GENERIC);
    assert!(store.history("tg-3").await.is_empty());
}

#[tokio::test]
async fn test_conversations_are_isolated_per_platform_key() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(reply_body("ok")))
        .mount(&mock_server)
        .await;

    let (responder, store) = build_responder(&mock_server.uri());

    // Same native id on two platforms must not share history
    responder.respond("tg-100", "from telegram").await;
    responder.respond("dc-100", "from discord").await;

    let telegram = store.history("tg-100").await;
    let discord = store.history("dc-100").await;
    assert_eq!(telegram.len(), 2);
    assert_eq!(discord.len(), 2);
    assert_eq!(telegram[0].content, "from telegram");
    assert_eq!(discord[0].content, "from discord");
}
