//! Conversation listing, creation and selection.
//!
//! Split into synchronous `begin_*`/`finish_*`/`apply_*` transitions on
//! [`ChatState`] plus async helpers that run them around the request, the
//! same way as [`crate::flow`].

use std::sync::Arc;

use crate::adapters::ReqwestHttpClient;
use crate::api::ChatApiClient;
use crate::error::{ChatResult, ErrorContext, ResultExt};
use crate::flow::MessageFlow;
use crate::models::{Conversation, CreateConversationRequest};
use crate::traits::HttpClient;
use crate::view::{AlertLevel, ChatState};

pub const CREATE_FAILED_TEXT: &str = "Could not create conversation. Please try again.";
pub const RECENT_FAILED_TEXT: &str = "Could not look up the most recent conversation.";
pub const NO_CONVERSATIONS_TEXT: &str = "No conversations found";

/// Stamp taken when a list request is issued.
///
/// A listing only proves a conversation is gone if that conversation was
/// already active when the request went out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListRequest {
    activation_seq: u64,
}

/// Next step after the startup listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartupStep {
    /// No conversations exist; create one
    Create,
    /// Load the most recent conversation, already made active
    Load(String),
    /// Listing failed; nothing else to do
    Idle,
}

pub struct ConversationStore<H: HttpClient = ReqwestHttpClient> {
    api: Arc<ChatApiClient<H>>,
}

impl<H: HttpClient> Clone for ConversationStore<H> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
        }
    }
}

impl<H: HttpClient> ConversationStore<H> {
    pub fn new(api: Arc<ChatApiClient<H>>) -> Self {
        Self { api }
    }

    pub fn begin_list(state: &ChatState) -> ListRequest {
        ListRequest {
            activation_seq: state.activation_seq(),
        }
    }

    /// Apply a list refresh. On failure the previous list stays.
    ///
    /// If the active conversation vanished from the backend it is dropped
    /// along with the message view, unless it was activated after the
    /// request was issued.
    pub fn apply_list(
        state: &mut ChatState,
        request: ListRequest,
        result: ChatResult<Vec<Conversation>>,
    ) {
        match result {
            Ok(conversations) => {
                tracing::debug!("Conversation list refreshed ({} entries)", conversations.len());
                let active = state.active_conversation_id().map(str::to_string);
                state.conversations.replace(conversations, active.as_deref());

                if let Some(id) = active {
                    if state.conversations.contains(&id) {
                        return;
                    }
                    if state.activation_seq() > request.activation_seq {
                        tracing::debug!(
                            "Listing predates activation of conversation {}, keeping it",
                            id
                        );
                    } else {
                        tracing::warn!("Active conversation {} is no longer listed", id);
                        state.clear_active();
                        state.messages.clear();
                    }
                }
            }
            Err(err) => {
                let err = err.with_context(ErrorContext::new("list_conversations"));
                tracing::error!("[{}] {}", err.error_code(), err);
            }
        }
    }

    /// Decide what startup does with the initial listing.
    pub fn apply_startup_list(
        state: &mut ChatState,
        request: ListRequest,
        result: ChatResult<Vec<Conversation>>,
    ) -> StartupStep {
        let failed = result.is_err();
        Self::apply_list(state, request, result);
        if failed {
            return StartupStep::Idle;
        }

        match state.conversations.conversations().first() {
            None => StartupStep::Create,
            Some(first) => {
                let id = first.id.clone();
                Self::select(state, &id);
                StartupStep::Load(id)
            }
        }
    }

    /// Request body for a new conversation in the current project.
    pub fn begin_create(state: &ChatState) -> CreateConversationRequest {
        let request = CreateConversationRequest::new(state.project_id());
        tracing::debug!("Creating conversation in project {}", request.project_id);
        request
    }

    /// Apply a creation result. Returns the new id on success; the caller
    /// then refreshes the list.
    pub fn finish_create(state: &mut ChatState, result: ChatResult<Conversation>) -> Option<String> {
        match result {
            Ok(conversation) => {
                tracing::info!("Created conversation {}", conversation.id);
                state.set_active(conversation.id.clone());
                state.messages.clear();
                state.composer.set_submit_enabled(true);
                Some(conversation.id)
            }
            Err(err) => {
                tracing::error!("[{}] {}", err.error_code(), err);
                state.alert_error(&err, CREATE_FAILED_TEXT);
                None
            }
        }
    }

    /// Apply a most-recent lookup. Returns the id to open; the caller
    /// selects it and loads its messages.
    pub fn finish_recent(
        state: &mut ChatState,
        result: ChatResult<Option<Conversation>>,
    ) -> Option<String> {
        match result {
            Ok(Some(conversation)) => {
                tracing::debug!("Most recent conversation is {}", conversation.id);
                Some(conversation.id)
            }
            Ok(None) => {
                state.alert(AlertLevel::Info, NO_CONVERSATIONS_TEXT);
                None
            }
            Err(err) => {
                let err = err.with_context(ErrorContext::new("recent_conversation"));
                tracing::error!("[{}] {}", err.error_code(), err);
                state.alert_error(&err, RECENT_FAILED_TEXT);
                None
            }
        }
    }

    /// Make a conversation active. The caller loads its messages next.
    pub fn select(state: &mut ChatState, conversation_id: &str) {
        tracing::debug!("Selecting conversation {}", conversation_id);
        state.set_active(conversation_id);
        let pending = state.is_in_flight(conversation_id);
        state.composer.set_submit_enabled(!pending);
    }

    pub async fn list_conversations(&self, state: &mut ChatState) {
        let request = Self::begin_list(state);
        let result = self.api.list_conversations().await;
        Self::apply_list(state, request, result);
    }

    /// Create a conversation, make it active and refresh the list.
    pub async fn create_conversation(&self, state: &mut ChatState) -> Option<String> {
        let request = Self::begin_create(state);
        let result = self
            .api
            .create_conversation(&request)
            .await
            .context(ErrorContext::new("create_conversation"));
        let id = Self::finish_create(state, result)?;
        self.list_conversations(state).await;
        Some(id)
    }

    /// Select a conversation and load its messages.
    pub async fn select_conversation(
        &self,
        state: &mut ChatState,
        flow: &MessageFlow<H>,
        conversation_id: &str,
    ) {
        Self::select(state, conversation_id);
        flow.load_messages(state, conversation_id).await;
    }
}
