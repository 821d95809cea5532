//! Failures detected before any request is issued.

use std::path::PathBuf;

use thiserror::Error;

/// Local checks that stop an operation before it reaches the network.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreconditionError {
    #[error("No active conversation")]
    NoActiveConversation,

    #[error("Message is empty")]
    EmptyMessage,

    #[error("A reply is still pending for conversation {conversation_id}")]
    SendInFlight { conversation_id: String },

    #[error("Project name is empty")]
    EmptyProjectName,

    #[error("Cannot read image {path:?}: {message}")]
    ImageUnreadable { path: PathBuf, message: String },
}

impl PreconditionError {
    /// Message shown in the alert stack.
    pub fn user_message(&self) -> String {
        match self {
            PreconditionError::NoActiveConversation => {
                "No active conversation. Please refresh the page.".to_string()
            }
            PreconditionError::EmptyMessage => "Message is empty.".to_string(),
            PreconditionError::SendInFlight { .. } => {
                "A reply is still pending for this conversation.".to_string()
            }
            PreconditionError::EmptyProjectName => "Please enter a project name".to_string(),
            PreconditionError::ImageUnreadable { path, .. } => {
                format!("Could not read image {}", path.display())
            }
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            PreconditionError::NoActiveConversation => "E_PRE_NO_ACTIVE",
            PreconditionError::EmptyMessage => "E_PRE_EMPTY",
            PreconditionError::SendInFlight { .. } => "E_PRE_IN_FLIGHT",
            PreconditionError::EmptyProjectName => "E_PRE_PROJECT_NAME",
            PreconditionError::ImageUnreadable { .. } => "E_PRE_IMAGE",
        }
    }
}
