use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{deserialize_optional_id, deserialize_timestamp};

/// A message within a conversation, as returned by the backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub id: Option<String>,
    /// Text content (absent for image-only messages)
    #[serde(default)]
    pub content: Option<String>,
    /// True when written by the user, false for agent replies
    #[serde(default)]
    pub is_user: bool,
    /// Name of the replying agent
    #[serde(default)]
    pub agent_name: Option<String>,
    /// When the server stored the message; `None` when missing or unreadable
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub has_image: bool,
    #[serde(default)]
    pub image_path: Option<String>,
}

impl Message {
    /// Image reference to display, only when the server flags one.
    pub fn image_ref(&self) -> Option<&str> {
        if self.has_image {
            self.image_path.as_deref()
        } else {
            None
        }
    }
}

/// Stable sort by timestamp ascending; unknown timestamps go first.
pub fn sort_chronologically(messages: &mut [Message]) {
    messages.sort_by_key(|m| m.timestamp);
}

/// Response from `GET /api/conversations/{id}/messages`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MessageListResponse {
    #[serde(default)]
    pub messages: Vec<Message>,
}
