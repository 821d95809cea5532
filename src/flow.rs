//! Message loading and the optimistic send sequence.
//!
//! Each operation is split in two synchronous halves around the network
//! call: `begin_*` applies the immediate view changes and `finish_*`
//! applies the completion. The TUI runs the request on a spawned task and
//! feeds the completion back through its message channel; the async
//! helpers on [`MessageFlow`] chain both halves inline.

use std::sync::Arc;

use chrono::Utc;

use crate::adapters::ReqwestHttpClient;
use crate::api::ChatApiClient;
use crate::error::{ChatResult, ErrorContext, PreconditionError};
use crate::models::{sort_chronologically, AgentReply, ImageAttachment, Message};
use crate::traits::HttpClient;
use crate::view::{AlertLevel, ChatState, RenderRow};

pub const LOAD_FAILED_TEXT: &str = "Failed to load conversation messages. Please try again.";
pub const SEND_FAILED_TEXT: &str = "Failed to send message. Please try again.";

/// A send that passed local checks and is waiting on the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSend {
    pub conversation_id: String,
    pub text: String,
    pub image: Option<ImageAttachment>,
}

/// What a completed send asks of the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SendOutcome {
    /// The reply was rendered into the active view
    pub rendered: bool,
    /// The backend changed conversation metadata; refresh the list
    pub refresh_list: bool,
}

pub struct MessageFlow<H: HttpClient = ReqwestHttpClient> {
    api: Arc<ChatApiClient<H>>,
}

impl<H: HttpClient> Clone for MessageFlow<H> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
        }
    }
}

impl<H: HttpClient> MessageFlow<H> {
    pub fn new(api: Arc<ChatApiClient<H>>) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &Arc<ChatApiClient<H>> {
        &self.api
    }

    /// Replace the view with a loading row.
    pub fn begin_load(state: &mut ChatState, conversation_id: &str) {
        tracing::debug!("Loading messages for conversation {}", conversation_id);
        state.messages.show_loading();
    }

    /// Apply a fetched history. Completions for a conversation that is no
    /// longer active are dropped.
    pub fn finish_load(
        state: &mut ChatState,
        conversation_id: &str,
        result: ChatResult<Vec<Message>>,
    ) {
        if !state.is_active(conversation_id) {
            tracing::debug!(
                "Discarding messages for conversation {} (no longer active)",
                conversation_id
            );
            return;
        }

        match result {
            Ok(mut messages) => {
                sort_chronologically(&mut messages);
                state.messages.render_history(&messages);
                if state.is_in_flight(conversation_id) {
                    state.messages.show_typing(conversation_id);
                }
            }
            Err(err) => {
                let err = err.with_context(
                    ErrorContext::new("load_messages").with_conversation_id(conversation_id),
                );
                tracing::error!("[{}] {}", err.error_code(), err);
                state.messages.remove_placeholders();
                state.alert_error(&err, LOAD_FAILED_TEXT);
            }
        }
    }

    /// Validate a submission and apply the optimistic render.
    ///
    /// On success the user row is shown, the composer is cleared and
    /// disabled, the typing indicator is the last row and the conversation
    /// is marked in flight. `EmptyMessage` is silent; other failures raise
    /// a warning alert. Nothing changes on failure besides the alert.
    pub fn begin_send(
        state: &mut ChatState,
        text: &str,
        image: Option<ImageAttachment>,
    ) -> Result<PendingSend, PreconditionError> {
        let conversation_id = match state.active_conversation_id() {
            Some(id) => id.to_string(),
            None => {
                let err = PreconditionError::NoActiveConversation;
                tracing::warn!("Send rejected: {}", err);
                state.alert(AlertLevel::Warning, err.user_message());
                return Err(err);
            }
        };

        let text = text.trim();
        if text.is_empty() {
            tracing::debug!("Empty message, not sending");
            return Err(PreconditionError::EmptyMessage);
        }

        if !state.mark_in_flight(&conversation_id) {
            let err = PreconditionError::SendInFlight { conversation_id };
            tracing::warn!("Send rejected: {}", err);
            state.alert(AlertLevel::Warning, err.user_message());
            return Err(err);
        }

        state.messages.remove_placeholders();
        let marker = image.as_ref().map(|i| i.file_name.clone());
        if let Some(row) = RenderRow::message(text, true, None, Some(Utc::now()), marker) {
            state.messages.push_row(row);
        }
        state.composer.reset();
        state.composer.set_submit_enabled(false);
        state.messages.show_typing(&conversation_id);

        tracing::debug!("Sending message to conversation {}", conversation_id);
        Ok(PendingSend {
            conversation_id,
            text: text.to_string(),
            image,
        })
    }

    /// Same as [`MessageFlow::begin_send`], taking text and image from the composer.
    pub fn begin_submit(state: &mut ChatState) -> Result<PendingSend, PreconditionError> {
        let text = state.composer.text().to_string();
        let image = state.composer.image().cloned();
        Self::begin_send(state, &text, image)
    }

    /// Apply a send completion.
    ///
    /// The in-flight flag and indicator are always cleared. A reply for a
    /// conversation that is no longer active is not rendered.
    pub fn finish_send(
        state: &mut ChatState,
        conversation_id: &str,
        result: ChatResult<AgentReply>,
    ) -> SendOutcome {
        state.clear_in_flight(conversation_id);
        state.messages.hide_typing_for(conversation_id);
        let submit_enabled = state
            .active_conversation_id()
            .map_or(true, |active| !state.is_in_flight(active));
        state.composer.set_submit_enabled(submit_enabled);

        match result {
            Ok(reply) => {
                let mut outcome = SendOutcome {
                    rendered: false,
                    refresh_list: reply.conversation_updated,
                };
                if state.is_active(conversation_id) {
                    if let Some(row) = RenderRow::message(
                        &reply.content,
                        false,
                        reply.agent_name.as_deref(),
                        Some(Utc::now()),
                        None,
                    ) {
                        state.messages.push_row(row);
                    }
                    outcome.rendered = true;
                } else {
                    tracing::debug!(
                        "Reply for conversation {} arrived after switching away",
                        conversation_id
                    );
                }
                outcome
            }
            Err(err) => {
                let err = err.with_context(
                    ErrorContext::new("send_message").with_conversation_id(conversation_id),
                );
                tracing::error!("[{}] {}", err.error_code(), err);
                state.alert_error(&err, SEND_FAILED_TEXT);
                SendOutcome::default()
            }
        }
    }

    /// Load and render a conversation's history.
    pub async fn load_messages(&self, state: &mut ChatState, conversation_id: &str) {
        Self::begin_load(state, conversation_id);
        let result = self.api.fetch_messages(conversation_id).await;
        Self::finish_load(state, conversation_id, result);
    }

    /// Run the full send sequence. `Err` only for rejected preconditions.
    pub async fn send_message(
        &self,
        state: &mut ChatState,
        text: &str,
        image: Option<ImageAttachment>,
    ) -> ChatResult<SendOutcome> {
        let pending = Self::begin_send(state, text, image)?;
        let result = self.deliver(&pending).await;
        Ok(Self::finish_send(state, &pending.conversation_id, result))
    }

    /// Issue the request for a pending send.
    pub async fn deliver(&self, pending: &PendingSend) -> ChatResult<AgentReply> {
        self.api
            .send_message(&pending.conversation_id, &pending.text, pending.image.as_ref())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ChatError, NetworkError};
    use crate::view::{RowKind, TypingIndicator};

    fn state_with_active(id: &str) -> ChatState {
        let mut state = ChatState::new(None);
        state.set_active(id);
        state
    }

    fn message(content: &str, is_user: bool, ts: &str) -> Message {
        serde_json::from_value(serde_json::json!({
            "content": content,
            "is_user": is_user,
            "timestamp": ts,
        }))
        .unwrap()
    }

    fn reply(content: &str, agent: Option<&str>) -> AgentReply {
        AgentReply {
            content: content.to_string(),
            agent_name: agent.map(str::to_string),
            conversation_updated: false,
        }
    }

    #[test]
    fn test_begin_send_without_active_warns() {
        let mut state = ChatState::new(None);
        let err = MessageFlow::<ReqwestHttpClient>::begin_send(&mut state, "hi", None).unwrap_err();
        assert_eq!(err, PreconditionError::NoActiveConversation);
        assert_eq!(state.alerts.latest().unwrap().level, AlertLevel::Warning);
        assert!(state.messages.rows().is_empty());
    }

    #[test]
    fn test_begin_send_whitespace_is_silent() {
        let mut state = state_with_active("5");
        state.composer.set_text("   \n ");
        let err = MessageFlow::<ReqwestHttpClient>::begin_submit(&mut state).unwrap_err();
        assert_eq!(err, PreconditionError::EmptyMessage);
        assert!(state.alerts.is_empty());
        assert!(state.messages.rows().is_empty());
        assert_eq!(state.composer.text(), "   \n ");
        assert!(!state.is_in_flight("5"));
    }

    #[test]
    fn test_begin_send_renders_user_then_indicator() {
        let mut state = state_with_active("5");
        state.messages.show_placeholder("No messages in this conversation yet.");
        state.composer.set_text("  Hello ");

        let pending = MessageFlow::<ReqwestHttpClient>::begin_submit(&mut state).unwrap();
        assert_eq!(pending.text, "Hello");
        assert_eq!(
            state.messages.kinds(),
            vec![RowKind::UserMessage, RowKind::TypingIndicator]
        );
        assert!(state.composer.is_empty());
        assert!(!state.composer.is_submit_enabled());
        assert!(state.is_in_flight("5"));
    }

    #[test]
    fn test_second_send_rejected_while_in_flight() {
        let mut state = state_with_active("5");
        MessageFlow::<ReqwestHttpClient>::begin_send(&mut state, "one", None).unwrap();
        let err = MessageFlow::<ReqwestHttpClient>::begin_send(&mut state, "two", None).unwrap_err();
        assert!(matches!(err, PreconditionError::SendInFlight { .. }));
        assert_eq!(state.messages.message_count(), 1);
        assert_eq!(
            state.alerts.latest().unwrap().message,
            "A reply is still pending for this conversation."
        );
    }

    #[test]
    fn test_finish_send_success_replaces_indicator() {
        let mut state = state_with_active("5");
        MessageFlow::<ReqwestHttpClient>::begin_send(&mut state, "Hello", None).unwrap();
        let outcome = MessageFlow::<ReqwestHttpClient>::finish_send(
            &mut state,
            "5",
            Ok(reply("Hi there", Some("Node-A"))),
        );

        assert!(outcome.rendered);
        assert_eq!(
            state.messages.kinds(),
            vec![RowKind::UserMessage, RowKind::AgentMessage]
        );
        assert_eq!(state.messages.rows()[1].sender.as_deref(), Some("Node-A"));
        assert_eq!(*state.messages.indicator(), TypingIndicator::Absent);
        assert!(state.composer.is_submit_enabled());
        assert!(!state.is_in_flight("5"));
    }

    #[test]
    fn test_finish_send_failure_keeps_user_row() {
        let mut state = state_with_active("5");
        MessageFlow::<ReqwestHttpClient>::begin_send(&mut state, "Hello", None).unwrap();
        let err: ChatError = NetworkError::HttpStatus {
            status: 500,
            message: "boom".to_string(),
        }
        .into();
        let outcome = MessageFlow::<ReqwestHttpClient>::finish_send(&mut state, "5", Err(err));

        assert!(!outcome.rendered);
        assert_eq!(state.messages.kinds(), vec![RowKind::UserMessage]);
        assert_eq!(state.alerts.latest().unwrap().message, SEND_FAILED_TEXT);
        assert_eq!(state.alerts.latest().unwrap().level, AlertLevel::Danger);
        assert!(state.composer.is_submit_enabled());
    }

    #[test]
    fn test_failure_alert_level_follows_error_category() {
        let mut state = state_with_active("5");
        MessageFlow::<ReqwestHttpClient>::begin_send(&mut state, "Hello", None).unwrap();
        let err: ChatError = PreconditionError::NoActiveConversation.into();
        MessageFlow::<ReqwestHttpClient>::finish_send(&mut state, "5", Err(err));

        let alert = state.alerts.latest().unwrap();
        assert_eq!(alert.message, SEND_FAILED_TEXT);
        assert_eq!(alert.level, AlertLevel::Warning);
    }

    #[test]
    fn test_reply_after_switch_is_not_rendered() {
        let mut state = state_with_active("5");
        MessageFlow::<ReqwestHttpClient>::begin_send(&mut state, "Hello", None).unwrap();

        state.set_active("6");
        MessageFlow::<ReqwestHttpClient>::begin_load(&mut state, "6");
        MessageFlow::<ReqwestHttpClient>::finish_load(&mut state, "6", Ok(vec![]));

        let outcome =
            MessageFlow::<ReqwestHttpClient>::finish_send(&mut state, "5", Ok(reply("late", None)));
        assert!(!outcome.rendered);
        assert_eq!(state.messages.kinds(), vec![RowKind::Placeholder]);
        assert!(!state.is_in_flight("5"));
    }

    #[test]
    fn test_finish_load_sorts_and_discards_stale() {
        let mut state = state_with_active("5");
        MessageFlow::<ReqwestHttpClient>::begin_load(&mut state, "5");
        MessageFlow::<ReqwestHttpClient>::finish_load(
            &mut state,
            "5",
            Ok(vec![
                message("second", false, "2026-10-19T10:01:00Z"),
                message("first", true, "2026-10-19T10:00:00Z"),
            ]),
        );
        let bodies: Vec<_> = state
            .messages
            .rows()
            .iter()
            .map(|r| r.body.plain_text())
            .collect();
        assert_eq!(bodies, vec!["first", "second"]);

        MessageFlow::<ReqwestHttpClient>::finish_load(
            &mut state,
            "9",
            Ok(vec![message("stale", true, "2026-10-19T11:00:00Z")]),
        );
        assert_eq!(state.messages.message_count(), 2);
    }

    #[test]
    fn test_finish_load_failure_alerts_and_leaves_view_empty() {
        let mut state = state_with_active("5");
        MessageFlow::<ReqwestHttpClient>::begin_load(&mut state, "5");
        let err: ChatError = NetworkError::Timeout {
            url: "u".to_string(),
            message: "slow".to_string(),
        }
        .into();
        MessageFlow::<ReqwestHttpClient>::finish_load(&mut state, "5", Err(err));

        assert!(state.messages.rows().is_empty());
        assert_eq!(state.alerts.latest().unwrap().message, LOAD_FAILED_TEXT);
    }

    fn contents(state: &ChatState) -> Vec<(RowKind, String)> {
        state
            .messages
            .rows()
            .iter()
            .map(|r| (r.kind, r.body.plain_text()))
            .collect()
    }

    #[test]
    fn test_history_replaces_rows_sent_during_load() {
        let mut state = state_with_active("5");
        MessageFlow::<ReqwestHttpClient>::begin_load(&mut state, "5");
        MessageFlow::<ReqwestHttpClient>::begin_send(&mut state, "new msg", None).unwrap();
        MessageFlow::<ReqwestHttpClient>::finish_load(
            &mut state,
            "5",
            Ok(vec![
                message("old1", true, "2026-10-19T10:00:00Z"),
                message("old2", false, "2026-10-19T10:00:01Z"),
            ]),
        );

        assert_eq!(
            contents(&state),
            vec![
                (RowKind::UserMessage, "old1".to_string()),
                (RowKind::AgentMessage, "old2".to_string()),
                (RowKind::TypingIndicator, String::new()),
            ]
        );
    }

    #[test]
    fn test_reply_during_reload_is_not_duplicated() {
        let mut state = state_with_active("5");
        MessageFlow::<ReqwestHttpClient>::begin_send(&mut state, "Hello", None).unwrap();
        MessageFlow::<ReqwestHttpClient>::begin_load(&mut state, "5");
        MessageFlow::<ReqwestHttpClient>::finish_send(
            &mut state,
            "5",
            Ok(reply("Hi there", Some("Node-A"))),
        );
        MessageFlow::<ReqwestHttpClient>::finish_load(
            &mut state,
            "5",
            Ok(vec![
                message("Hello", true, "2026-10-19T10:00:00Z"),
                message("Hi there", false, "2026-10-19T10:00:02Z"),
            ]),
        );

        assert_eq!(
            contents(&state),
            vec![
                (RowKind::UserMessage, "Hello".to_string()),
                (RowKind::AgentMessage, "Hi there".to_string()),
            ]
        );
    }

    #[test]
    fn test_reload_while_in_flight_restores_indicator() {
        let mut state = state_with_active("5");
        MessageFlow::<ReqwestHttpClient>::begin_send(&mut state, "Hello", None).unwrap();
        MessageFlow::<ReqwestHttpClient>::begin_load(&mut state, "5");
        MessageFlow::<ReqwestHttpClient>::finish_load(
            &mut state,
            "5",
            Ok(vec![message("Hello", true, "2026-10-19T10:00:00Z")]),
        );
        assert_eq!(
            state.messages.kinds(),
            vec![RowKind::UserMessage, RowKind::TypingIndicator]
        );
    }
}
