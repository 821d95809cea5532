use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Body of `POST /api/conversations`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateConversationRequest {
    pub project_id: i64,
    /// Omitted so the backend picks its own default title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl CreateConversationRequest {
    pub fn new(project_id: i64) -> Self {
        Self {
            project_id,
            title: None,
        }
    }

    pub fn with_title(project_id: i64, title: impl Into<String>) -> Self {
        Self {
            project_id,
            title: Some(title.into()),
        }
    }
}

/// Response from `POST /api/conversations/{id}/messages`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SendMessageResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub agent_name: Option<String>,
    #[serde(default)]
    pub conversation_updated: bool,
    #[serde(default)]
    pub error: Option<String>,
}

impl SendMessageResponse {
    /// Validate the payload into a reply.
    ///
    /// An `error` field wins over `success`; a successful payload without a
    /// `response` is malformed.
    pub fn into_reply(self) -> Result<AgentReply, ApiError> {
        if let Some(message) = self.error {
            return Err(ApiError::Rejected { message });
        }
        if !self.success {
            return Err(ApiError::Rejected {
                message: "Backend reported failure".to_string(),
            });
        }
        let content = self
            .response
            .ok_or(ApiError::MissingField { field: "response" })?;

        Ok(AgentReply {
            content,
            agent_name: self.agent_name,
            conversation_updated: self.conversation_updated,
        })
    }
}

/// A validated agent reply
#[derive(Debug, Clone, PartialEq)]
pub struct AgentReply {
    pub content: String,
    pub agent_name: Option<String>,
    pub conversation_updated: bool,
}
