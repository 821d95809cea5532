//! The single owner of everything the client renders.

use std::collections::HashSet;
use std::time::Instant;

use uuid::Uuid;

use super::alerts::{AlertLevel, AlertQueue};
use super::composer::Composer;
use super::conversation_list::ConversationListView;
use super::message_view::MessageView;
use crate::error::ChatError;
use crate::models::OllamaStatus;

/// Project used for conversation creation when none is configured.
pub const DEFAULT_PROJECT_ID: i64 = 1;

/// Model backend badge shown in the status line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BackendStatus {
    /// No check has completed yet
    #[default]
    Unchecked,
    Running { has_vision_model: Option<bool> },
    NotRunning,
    /// The status request itself failed
    Unknown,
}

impl BackendStatus {
    pub fn label(&self) -> &'static str {
        match self {
            BackendStatus::Unchecked => "Checking...",
            BackendStatus::Running { .. } => "Ollama Running",
            BackendStatus::NotRunning => "Ollama Not Running",
            BackendStatus::Unknown => "Status Unknown",
        }
    }
}

impl From<&OllamaStatus> for BackendStatus {
    fn from(status: &OllamaStatus) -> Self {
        if status.running {
            BackendStatus::Running {
                has_vision_model: status.has_vision_model,
            }
        } else {
            BackendStatus::NotRunning
        }
    }
}

/// View-model for one chat client instance.
///
/// Every mutation happens on the task that owns this value; network
/// completions are applied to it in arrival order.
#[derive(Debug, Clone, Default)]
pub struct ChatState {
    active_conversation_id: Option<String>,
    project_id: Option<i64>,
    pub conversations: ConversationListView,
    pub messages: MessageView,
    pub composer: Composer,
    pub alerts: AlertQueue,
    pub backend_status: BackendStatus,
    in_flight: HashSet<String>,
    /// Bumped on every activation; list requests are stamped with it
    activations: u64,
}

impl ChatState {
    pub fn new(project_id: Option<i64>) -> Self {
        Self {
            project_id,
            ..Self::default()
        }
    }

    /// Project id for new conversations.
    pub fn project_id(&self) -> i64 {
        self.project_id.unwrap_or(DEFAULT_PROJECT_ID)
    }

    pub fn configured_project_id(&self) -> Option<i64> {
        self.project_id
    }

    pub fn set_project_id(&mut self, project_id: i64) {
        self.project_id = Some(project_id);
    }

    pub fn active_conversation_id(&self) -> Option<&str> {
        self.active_conversation_id.as_deref()
    }

    pub fn is_active(&self, conversation_id: &str) -> bool {
        self.active_conversation_id.as_deref() == Some(conversation_id)
    }

    /// Set the active conversation and move the list cursor onto it.
    pub fn set_active(&mut self, conversation_id: impl Into<String>) {
        let id = conversation_id.into();
        self.conversations.set_cursor_to(&id);
        self.active_conversation_id = Some(id);
        self.activations += 1;
    }

    /// Number of activations so far.
    pub fn activation_seq(&self) -> u64 {
        self.activations
    }

    pub fn clear_active(&mut self) {
        self.active_conversation_id = None;
    }

    pub fn is_in_flight(&self, conversation_id: &str) -> bool {
        self.in_flight.contains(conversation_id)
    }

    /// Returns false if a send was already pending for the conversation.
    pub fn mark_in_flight(&mut self, conversation_id: &str) -> bool {
        self.in_flight.insert(conversation_id.to_string())
    }

    pub fn clear_in_flight(&mut self, conversation_id: &str) {
        self.in_flight.remove(conversation_id);
    }

    pub fn alert(&mut self, level: AlertLevel, message: impl Into<String>) -> Uuid {
        self.alerts.push(level, message)
    }

    /// Raise an alert for a failed operation, leveled by the error category.
    pub fn alert_error(&mut self, err: &ChatError, message: impl Into<String>) -> Uuid {
        self.alerts.push(err.category().alert_level(), message)
    }

    /// Periodic housekeeping. Returns true if anything visible changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.alerts.prune_expired(now) > 0
    }
}
