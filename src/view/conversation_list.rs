//! Conversation selector model.

use chrono::{DateTime, Local, Utc};

use crate::models::Conversation;

pub const EMPTY_LIST_TEXT: &str = "No conversations yet";

/// One rendered selector entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    pub id: String,
    pub title: String,
    pub date_label: String,
    /// True for the active conversation
    pub selected: bool,
}

/// Conversation list plus a keyboard cursor.
#[derive(Debug, Clone, Default)]
pub struct ConversationListView {
    conversations: Vec<Conversation>,
    cursor: usize,
}

impl ConversationListView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the list, keeping the cursor on `active` when present.
    pub fn replace(&mut self, conversations: Vec<Conversation>, active: Option<&str>) {
        self.conversations = conversations;
        match active {
            Some(id) => self.set_cursor_to(id),
            None => self.cursor = 0,
        }
        self.clamp_cursor();
    }

    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    pub fn is_empty(&self) -> bool {
        self.conversations.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.conversations.iter().any(|c| c.id == id)
    }

    /// Entries for display, flagging `active` as selected.
    pub fn entries(&self, active: Option<&str>) -> Vec<ListEntry> {
        self.conversations
            .iter()
            .map(|conversation| ListEntry {
                id: conversation.id.clone(),
                title: conversation.display_title().to_string(),
                date_label: conversation
                    .updated_at
                    .or(conversation.created_at)
                    .map(|dt| format_date_label(&dt))
                    .unwrap_or_default(),
                selected: active == Some(conversation.id.as_str()),
            })
            .collect()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn cursor_id(&self) -> Option<&str> {
        self.conversations.get(self.cursor).map(|c| c.id.as_str())
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.cursor + 1 < self.conversations.len() {
            self.cursor += 1;
        }
    }

    pub fn set_cursor_to(&mut self, id: &str) {
        if let Some(index) = self.conversations.iter().position(|c| c.id == id) {
            self.cursor = index;
        }
    }

    fn clamp_cursor(&mut self) {
        if self.cursor >= self.conversations.len() {
            self.cursor = self.conversations.len().saturating_sub(1);
        }
    }
}

/// `Mon DD HH:MM` in local time.
pub fn format_date_label(dt: &DateTime<Utc>) -> String {
    dt.with_timezone(&Local).format("%b %d %H:%M").to_string()
}
