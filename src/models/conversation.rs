use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{deserialize_id, deserialize_optional_id, deserialize_timestamp};

/// Title shown for conversations the backend has not named yet.
pub const UNTITLED_CONVERSATION: &str = "Untitled Conversation";

/// A conversation as listed by the backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Conversation {
    /// Server-assigned identifier (integer or string on the wire)
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub project_id: Option<String>,
}

impl Conversation {
    /// Title to display, falling back to a placeholder for blank titles.
    pub fn display_title(&self) -> &str {
        match self.title.as_deref() {
            Some(title) if !title.trim().is_empty() => title,
            _ => UNTITLED_CONVERSATION,
        }
    }
}

/// Response from `GET /api/conversations`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ConversationListResponse {
    #[serde(default)]
    pub conversations: Vec<Conversation>,
}
