//! View-model for the chat client.
//!
//! Everything here is plain data with synchronous mutation. Presentation
//! lives in [`crate::ui`]; network sequencing lives in the store and flow.

pub mod alerts;
pub mod composer;
pub mod conversation_list;
pub mod format;
pub mod message_view;
pub mod rows;
pub mod scroll;
pub mod state;

pub use alerts::{Alert, AlertLevel, AlertQueue, ALERT_TTL};
pub use composer::Composer;
pub use conversation_list::{ConversationListView, ListEntry, EMPTY_LIST_TEXT};
pub use format::{FormattedText, Segment};
pub use message_view::{MessageView, TypingIndicator};
pub use rows::{RenderRow, RowKind, DEFAULT_AGENT_NAME, EMPTY_CONVERSATION_TEXT, USER_SENDER};
pub use scroll::ScrollState;
pub use state::{BackendStatus, ChatState, DEFAULT_PROJECT_ID};
