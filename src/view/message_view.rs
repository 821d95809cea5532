//! The scrollable message pane model.
//!
//! Rows are kept in display order. When the typing indicator is shown it is
//! always the last row: new rows are inserted in front of it.

use uuid::Uuid;

use super::rows::{RenderRow, RowKind, EMPTY_CONVERSATION_TEXT};
use super::scroll::ScrollState;
use crate::models::Message;

/// Pending-reply indicator state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TypingIndicator {
    #[default]
    Absent,
    Shown {
        row_id: Uuid,
        conversation_id: String,
    },
}

impl TypingIndicator {
    pub fn is_shown(&self) -> bool {
        matches!(self, TypingIndicator::Shown { .. })
    }
}

#[derive(Debug, Clone, Default)]
pub struct MessageView {
    rows: Vec<RenderRow>,
    indicator: TypingIndicator,
    pub scroll: ScrollState,
}

impl MessageView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[RenderRow] {
        &self.rows
    }

    pub fn indicator(&self) -> &TypingIndicator {
        &self.indicator
    }

    /// Number of user and agent message rows.
    pub fn message_count(&self) -> usize {
        self.rows.iter().filter(|row| row.is_message()).count()
    }

    /// Drop every row, including any indicator.
    pub fn clear(&mut self) {
        self.rows.clear();
        self.indicator = TypingIndicator::Absent;
        self.scroll = ScrollState::new();
    }

    /// Replace the view with a single loading row.
    pub fn show_loading(&mut self) {
        self.clear();
        self.rows.push(RenderRow::loading());
    }

    pub fn show_placeholder(&mut self, text: &str) {
        self.push_row(RenderRow::placeholder(text));
    }

    /// Remove loading and empty-state rows.
    pub fn remove_placeholders(&mut self) {
        self.rows.retain(|row| !row.kind.is_transient_placeholder());
    }

    /// Insert a row at the end of the content (in front of the indicator)
    /// and pin the pane to the bottom.
    pub fn push_row(&mut self, row: RenderRow) -> Uuid {
        let id = row.id;
        let position = match &self.indicator {
            TypingIndicator::Shown { row_id, .. } => self
                .rows
                .iter()
                .position(|r| r.id == *row_id)
                .unwrap_or(self.rows.len()),
            TypingIndicator::Absent => self.rows.len(),
        };
        self.rows.insert(position, row);
        self.scroll.scroll_to_bottom();
        id
    }

    /// Render one message. Returns the new row id, or `None` when the
    /// message had nothing to display.
    pub fn render_message(&mut self, message: &Message) -> Option<Uuid> {
        let row = RenderRow::from_message(message)?;
        Some(self.push_row(row))
    }

    /// Replace the view with the given messages (already ordered).
    ///
    /// Every row except the typing indicator is dropped first, so the
    /// history is authoritative and the indicator stays last.
    pub fn render_history(&mut self, messages: &[Message]) {
        match &self.indicator {
            TypingIndicator::Shown { row_id, .. } => {
                let row_id = *row_id;
                self.rows.retain(|row| row.id == row_id);
            }
            TypingIndicator::Absent => self.rows.clear(),
        }
        let rendered = messages
            .iter()
            .filter(|message| self.render_message(message).is_some())
            .count();
        tracing::debug!("Rendered {} of {} messages", rendered, messages.len());

        if self.message_count() == 0 {
            self.show_placeholder(EMPTY_CONVERSATION_TEXT);
        }
    }

    /// Show the typing indicator for a conversation. At most one exists;
    /// calling this while shown returns the existing row id.
    pub fn show_typing(&mut self, conversation_id: &str) -> Uuid {
        if let TypingIndicator::Shown { row_id, .. } = &self.indicator {
            return *row_id;
        }
        let row = RenderRow::typing_indicator();
        let row_id = row.id;
        self.rows.push(row);
        self.indicator = TypingIndicator::Shown {
            row_id,
            conversation_id: conversation_id.to_string(),
        };
        self.scroll.scroll_to_bottom();
        row_id
    }

    /// Remove the indicator if it belongs to `conversation_id`.
    pub fn hide_typing_for(&mut self, conversation_id: &str) -> bool {
        match &self.indicator {
            TypingIndicator::Shown {
                conversation_id: shown,
                ..
            } if shown == conversation_id => self.hide_typing(),
            _ => false,
        }
    }

    /// Remove the indicator. Returns true if one was shown.
    pub fn hide_typing(&mut self) -> bool {
        match std::mem::take(&mut self.indicator) {
            TypingIndicator::Shown { row_id, .. } => {
                self.rows.retain(|row| row.id != row_id);
                true
            }
            TypingIndicator::Absent => false,
        }
    }

    /// Kinds of all rows in display order.
    pub fn kinds(&self) -> Vec<RowKind> {
        self.rows.iter().map(|row| row.kind).collect()
    }
}
