//! Structured rows consumed by the message pane.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::format::FormattedText;
use crate::models::Message;

/// Sender label for agent replies that carry no name.
pub const DEFAULT_AGENT_NAME: &str = "Fractal Node";

/// Sender label for the local user.
pub const USER_SENDER: &str = "You";

pub const EMPTY_CONVERSATION_TEXT: &str = "No messages in this conversation yet.";
pub const LOADING_TEXT: &str = "Loading messages...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    UserMessage,
    AgentMessage,
    TypingIndicator,
    Loading,
    Placeholder,
}

impl RowKind {
    /// Rows that stand in for missing content and are dropped once real
    /// messages arrive.
    pub fn is_transient_placeholder(&self) -> bool {
        matches!(self, RowKind::Loading | RowKind::Placeholder)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderRow {
    pub id: Uuid,
    pub kind: RowKind,
    pub sender: Option<String>,
    pub body: FormattedText,
    pub timestamp: Option<DateTime<Utc>>,
    /// Server-side image path shown as an attachment marker
    pub image: Option<String>,
}

impl RenderRow {
    fn new(kind: RowKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            sender: None,
            body: FormattedText::default(),
            timestamp: None,
            image: None,
        }
    }

    /// Build a message row, or `None` when there is nothing to show.
    pub fn message(
        content: &str,
        is_user: bool,
        agent_name: Option<&str>,
        timestamp: Option<DateTime<Utc>>,
        image: Option<String>,
    ) -> Option<Self> {
        let body = FormattedText::format(content);
        if body.is_empty() && image.is_none() {
            return None;
        }

        let (kind, sender) = if is_user {
            (RowKind::UserMessage, USER_SENDER.to_string())
        } else {
            let name = agent_name
                .filter(|name| !name.trim().is_empty())
                .unwrap_or(DEFAULT_AGENT_NAME);
            (RowKind::AgentMessage, name.to_string())
        };

        Some(Self {
            sender: Some(sender),
            body,
            timestamp,
            image,
            ..Self::new(kind)
        })
    }

    pub fn from_message(message: &Message) -> Option<Self> {
        Self::message(
            message.content.as_deref().unwrap_or(""),
            message.is_user,
            message.agent_name.as_deref(),
            message.timestamp,
            message.image_ref().map(str::to_string),
        )
    }

    pub fn typing_indicator() -> Self {
        Self::new(RowKind::TypingIndicator)
    }

    pub fn loading() -> Self {
        Self {
            body: FormattedText::format(LOADING_TEXT),
            ..Self::new(RowKind::Loading)
        }
    }

    pub fn placeholder(text: &str) -> Self {
        Self {
            body: FormattedText::format(text),
            ..Self::new(RowKind::Placeholder)
        }
    }

    pub fn is_message(&self) -> bool {
        matches!(self.kind, RowKind::UserMessage | RowKind::AgentMessage)
    }
}
