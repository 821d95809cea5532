//! End-to-end chat flows against a wiremock backend.

mod common;

use common::{conversation_json, message_json, mount_list, mount_messages, mount_reply, session_for};
use nodechat::models::ImageAttachment;
use nodechat::view::{AlertLevel, ChatState, RowKind, EMPTY_CONVERSATION_TEXT};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn bodies(state: &ChatState) -> Vec<String> {
    state
        .messages
        .rows()
        .iter()
        .map(|row| row.body.plain_text())
        .collect()
}

#[tokio::test]
async fn test_startup_with_no_conversations_creates_exactly_one() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/conversations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"conversations": []})))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/conversations"))
        .and(body_json(json!({"project_id": 1})))
        .respond_with(ResponseTemplate::new(201).set_body_json(conversation_json(11, "Conversation")))
        .expect(1)
        .mount(&server)
        .await;
    mount_list(&server, vec![conversation_json(11, "Conversation")]).await;

    let session = session_for(&server);
    let mut state = ChatState::new(None);
    session.start(&mut state).await;

    assert_eq!(state.active_conversation_id(), Some("11"));
    assert_eq!(state.conversations.conversations().len(), 1);
    assert_eq!(state.messages.message_count(), 0);
}

#[tokio::test]
async fn test_startup_loads_most_recent_sorted() {
    let server = MockServer::start().await;
    mount_list(
        &server,
        vec![conversation_json(2, "Newest"), conversation_json(1, "Older")],
    )
    .await;
    mount_messages(
        &server,
        2,
        vec![
            message_json(3, "third", false, "2024-03-01T10:00:03"),
            message_json(1, "first", true, "2024-03-01T10:00:01"),
            message_json(2, "second", false, "2024-03-01T10:00:02"),
        ],
    )
    .await;

    let session = session_for(&server);
    let mut state = ChatState::new(None);
    session.start(&mut state).await;

    assert_eq!(state.active_conversation_id(), Some("2"));
    assert_eq!(bodies(&state), vec!["first", "second", "third"]);
}

#[tokio::test]
async fn test_empty_history_shows_placeholder() {
    let server = MockServer::start().await;
    mount_list(&server, vec![conversation_json(4, "Quiet")]).await;
    mount_messages(&server, 4, vec![]).await;

    let session = session_for(&server);
    let mut state = ChatState::new(None);
    session.start(&mut state).await;

    assert_eq!(state.messages.kinds(), vec![RowKind::Placeholder]);
    assert_eq!(bodies(&state), vec![EMPTY_CONVERSATION_TEXT]);
}

#[tokio::test]
async fn test_send_hello_renders_agent_reply() {
    let server = MockServer::start().await;
    mount_list(&server, vec![conversation_json(5, "Chat")]).await;
    mount_messages(&server, 5, vec![]).await;
    mount_reply(&server, 5, "Hi there", "Node-A", false).await;

    let session = session_for(&server);
    let mut state = ChatState::new(None);
    session.start(&mut state).await;

    let outcome = session.send_message(&mut state, "Hello", None).await.unwrap();
    assert!(outcome.rendered);

    let rows = state.messages.rows();
    assert_eq!(
        state.messages.kinds(),
        vec![RowKind::UserMessage, RowKind::AgentMessage]
    );
    assert_eq!(rows[0].body.plain_text(), "Hello");
    assert_eq!(rows[1].body.plain_text(), "Hi there");
    assert_eq!(rows[1].sender.as_deref(), Some("Node-A"));
    assert!(state.composer.is_empty());
    assert!(state.composer.is_submit_enabled());
}

#[tokio::test]
async fn test_whitespace_message_sends_nothing() {
    let server = MockServer::start().await;
    mount_list(&server, vec![conversation_json(5, "Chat")]).await;
    mount_messages(&server, 5, vec![]).await;
    Mock::given(method("POST"))
        .and(path("/api/conversations/5/messages"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let session = session_for(&server);
    let mut state = ChatState::new(None);
    session.start(&mut state).await;

    assert!(session.send_message(&mut state, "   \n ", None).await.is_err());
    assert!(state.alerts.is_empty());
    assert_eq!(state.messages.kinds(), vec![RowKind::Placeholder]);
}

#[tokio::test]
async fn test_failed_send_keeps_user_message() {
    let server = MockServer::start().await;
    mount_list(&server, vec![conversation_json(5, "Chat")]).await;
    mount_messages(&server, 5, vec![]).await;
    Mock::given(method("POST"))
        .and(path("/api/conversations/5/messages"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "model crashed"})))
        .mount(&server)
        .await;

    let session = session_for(&server);
    let mut state = ChatState::new(None);
    session.start(&mut state).await;

    let outcome = session.send_message(&mut state, "Hello", None).await.unwrap();
    assert!(!outcome.rendered);
    assert_eq!(state.messages.kinds(), vec![RowKind::UserMessage]);
    assert_eq!(state.alerts.latest().unwrap().level, AlertLevel::Danger);
    assert!(!state.is_in_flight("5"));
    assert!(state.composer.is_submit_enabled());
}

#[tokio::test]
async fn test_send_with_image_marks_user_row() {
    let server = MockServer::start().await;
    mount_list(&server, vec![conversation_json(5, "Chat")]).await;
    mount_messages(&server, 5, vec![]).await;
    mount_reply(&server, 5, "A cat", "Vision", false).await;

    let session = session_for(&server);
    let mut state = ChatState::new(None);
    session.start(&mut state).await;

    let image = ImageAttachment::from_bytes("cat.png", bytes::Bytes::from_static(b"img"));
    session
        .send_message(&mut state, "What is this?", Some(image))
        .await
        .unwrap();
    assert_eq!(state.messages.rows()[0].image.as_deref(), Some("cat.png"));
}

#[tokio::test]
async fn test_conversation_updated_refreshes_titles() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/conversations"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"conversations": [conversation_json(5, "Conversation")]})),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_list(&server, vec![conversation_json(5, "Trip planning")]).await;
    mount_messages(&server, 5, vec![]).await;
    mount_reply(&server, 5, "Sure", "Node-A", true).await;

    let session = session_for(&server);
    let mut state = ChatState::new(None);
    session.start(&mut state).await;
    session.send_message(&mut state, "Plan a trip", None).await.unwrap();

    assert_eq!(
        state.conversations.conversations()[0].display_title(),
        "Trip planning"
    );
}

#[tokio::test]
async fn test_project_creation_scopes_new_conversations() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/conversations"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"conversations": [conversation_json(5, "Chat")]})),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_list(
        &server,
        vec![conversation_json(9, "Conversation"), conversation_json(5, "Chat")],
    )
    .await;
    mount_messages(&server, 5, vec![]).await;
    Mock::given(method("POST"))
        .and(path("/api/projects"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 8,
            "name": "Research",
            "description": "papers"
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/conversations"))
        .and(body_json(json!({"project_id": 8})))
        .respond_with(ResponseTemplate::new(201).set_body_json(conversation_json(9, "Conversation")))
        .expect(1)
        .mount(&server)
        .await;

    let session = session_for(&server);
    let mut state = ChatState::new(None);
    session.start(&mut state).await;

    let project_id = session
        .create_project(&mut state, "Research", "papers")
        .await;
    assert_eq!(project_id, Some(8));
    assert_eq!(state.alerts.latest().unwrap().level, AlertLevel::Success);

    let created = session.new_conversation(&mut state).await;
    assert_eq!(created.as_deref(), Some("9"));
    assert_eq!(state.active_conversation_id(), Some("9"));
}

#[tokio::test]
async fn test_project_failure_reports_backend_reason() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/projects"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"error": "Project name is required"})),
        )
        .mount(&server)
        .await;

    let session = session_for(&server);
    let mut state = ChatState::new(None);
    assert!(session.create_project(&mut state, "x", "").await.is_none());

    let alert = state.alerts.latest().unwrap();
    assert_eq!(alert.level, AlertLevel::Danger);
    assert_eq!(alert.message, "Failed to create project: Project name is required");
}

#[tokio::test]
async fn test_unreachable_backend_leaves_startup_idle() {
    let server = MockServer::start().await;
    let session = session_for(&server);
    drop(server);

    let mut state = ChatState::new(None);
    session.start(&mut state).await;
    assert!(state.active_conversation_id().is_none());
    assert!(state.conversations.is_empty());

    session.check_ollama_status(&mut state).await;
    assert_eq!(state.backend_status.label(), "Status Unknown");
}
