//! Common test utilities for integration tests.
//!
//! Fixtures for a wiremock backend and a session pointed at it.

#![allow(dead_code)]

use nodechat::api::ChatApiClient;
use nodechat::session::ChatSession;
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Session backed by reqwest, talking to `server`.
pub fn session_for(server: &MockServer) -> ChatSession {
    ChatSession::new(ChatApiClient::new(server.uri()))
}

pub fn conversation_json(id: i64, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "created_at": "2024-03-01T10:00:00",
        "updated_at": "2024-03-01T10:05:00",
        "project_id": 1
    })
}

pub fn message_json(id: i64, content: &str, is_user: bool, timestamp: &str) -> Value {
    json!({
        "id": id,
        "content": content,
        "is_user": is_user,
        "timestamp": timestamp,
        "has_image": false
    })
}

/// Mount `GET /api/conversations` returning `conversations`.
pub async fn mount_list(server: &MockServer, conversations: Vec<Value>) {
    Mock::given(method("GET"))
        .and(path("/api/conversations"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "conversations": conversations })),
        )
        .mount(server)
        .await;
}

/// Mount `GET /api/conversations/{id}/messages` returning `messages`.
pub async fn mount_messages(server: &MockServer, conversation_id: i64, messages: Vec<Value>) {
    Mock::given(method("GET"))
        .and(path(format!("/api/conversations/{}/messages", conversation_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "messages": messages })))
        .mount(server)
        .await;
}

/// Mount a successful send reply for a conversation.
pub async fn mount_reply(
    server: &MockServer,
    conversation_id: i64,
    response: &str,
    agent_name: &str,
    conversation_updated: bool,
) {
    Mock::given(method("POST"))
        .and(path(format!("/api/conversations/{}/messages", conversation_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "response": response,
            "agent_name": agent_name,
            "conversation_updated": conversation_updated
        })))
        .mount(server)
        .await;
}
