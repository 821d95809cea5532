//! AppMessage enum for async communication within the application.

use crate::error::{ChatResult, PreconditionError};
use crate::models::{AgentReply, Conversation, ImageAttachment, Message, OllamaStatus, Project};
use crate::store::ListRequest;

/// Completions reported by spawned network tasks.
#[derive(Debug)]
pub enum AppMessage {
    /// Initial conversation listing
    StartupListed {
        request: ListRequest,
        result: ChatResult<Vec<Conversation>>,
    },
    /// Conversation list refreshed
    ConversationsListed {
        request: ListRequest,
        result: ChatResult<Vec<Conversation>>,
    },
    /// Most recent conversation lookup finished
    RecentFound(ChatResult<Option<Conversation>>),
    /// Conversation creation finished
    ConversationCreated(ChatResult<Conversation>),
    /// History fetched for a conversation
    MessagesLoaded {
        conversation_id: String,
        result: ChatResult<Vec<Message>>,
    },
    /// Agent reply (or failure) for a send
    SendFinished {
        conversation_id: String,
        result: ChatResult<AgentReply>,
    },
    /// Project creation finished
    ProjectCreated(ChatResult<Project>),
    /// Model backend probe finished
    StatusChecked(ChatResult<OllamaStatus>),
    /// Image file read from disk
    ImageLoaded(Result<ImageAttachment, PreconditionError>),
}
