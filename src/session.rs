//! High-level chat session: startup, projects and backend status on top of
//! [`ConversationStore`] and [`MessageFlow`].

use std::sync::Arc;

use crate::adapters::ReqwestHttpClient;
use crate::api::ChatApiClient;
use crate::error::{ChatError, ChatResult, ErrorContext, PreconditionError, ResultExt};
use crate::flow::{MessageFlow, SendOutcome};
use crate::models::{CreateProjectRequest, ImageAttachment, OllamaStatus, Project};
use crate::store::{ConversationStore, StartupStep};
use crate::traits::HttpClient;
use crate::view::{AlertLevel, BackendStatus, ChatState};

pub const PROJECT_CREATED_TEXT: &str = "Project created successfully!";

/// Owns the API client and both controllers for one client instance.
pub struct ChatSession<H: HttpClient = ReqwestHttpClient> {
    api: Arc<ChatApiClient<H>>,
    pub store: ConversationStore<H>,
    pub flow: MessageFlow<H>,
}

impl<H: HttpClient> Clone for ChatSession<H> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            store: self.store.clone(),
            flow: self.flow.clone(),
        }
    }
}

impl<H: HttpClient> ChatSession<H> {
    pub fn new(api: ChatApiClient<H>) -> Self {
        Self::from_shared(Arc::new(api))
    }

    pub fn from_shared(api: Arc<ChatApiClient<H>>) -> Self {
        Self {
            store: ConversationStore::new(Arc::clone(&api)),
            flow: MessageFlow::new(Arc::clone(&api)),
            api,
        }
    }

    pub fn api(&self) -> &Arc<ChatApiClient<H>> {
        &self.api
    }

    /// List conversations, then create one if none exist or load the most
    /// recent one.
    pub async fn start(&self, state: &mut ChatState) {
        tracing::info!("Starting chat session against {}", self.api.base_url);
        let request = ConversationStore::<H>::begin_list(state);
        let result = self.api.list_conversations().await;
        match ConversationStore::<H>::apply_startup_list(state, request, result) {
            StartupStep::Create => {
                self.store.create_conversation(state).await;
            }
            StartupStep::Load(id) => {
                self.flow.load_messages(state, &id).await;
            }
            StartupStep::Idle => {}
        }
    }

    pub async fn select_conversation(&self, state: &mut ChatState, conversation_id: &str) {
        self.store
            .select_conversation(state, &self.flow, conversation_id)
            .await;
    }

    pub async fn new_conversation(&self, state: &mut ChatState) -> Option<String> {
        self.store.create_conversation(state).await
    }

    /// Send and, when the backend asks for it, refresh the list.
    pub async fn send_message(
        &self,
        state: &mut ChatState,
        text: &str,
        image: Option<ImageAttachment>,
    ) -> ChatResult<SendOutcome> {
        let outcome = self.flow.send_message(state, text, image).await?;
        if outcome.refresh_list {
            self.store.list_conversations(state).await;
        }
        Ok(outcome)
    }

    /// Validate a project name. Empty names raise a danger alert.
    pub fn begin_create_project(
        state: &mut ChatState,
        name: &str,
        description: &str,
    ) -> Result<CreateProjectRequest, PreconditionError> {
        let name = name.trim();
        if name.is_empty() {
            let err = PreconditionError::EmptyProjectName;
            tracing::warn!("Project creation rejected: {}", err);
            state.alert(AlertLevel::Danger, err.user_message());
            return Err(err);
        }
        Ok(CreateProjectRequest {
            name: name.to_string(),
            description: description.trim().to_string(),
        })
    }

    /// Apply a project creation result. The new project scopes later
    /// conversation creation.
    pub fn finish_create_project(state: &mut ChatState, result: ChatResult<Project>) {
        match result {
            Ok(project) => {
                tracing::info!("Created project {} ({})", project.id, project.name);
                state.set_project_id(project.id);
                state.alert(AlertLevel::Success, PROJECT_CREATED_TEXT);
            }
            Err(err) => {
                tracing::error!("[{}] {}", err.error_code(), err);
                let text = format!("Failed to create project: {}", failure_reason(&err));
                state.alert_error(&err, text);
            }
        }
    }

    pub async fn create_project(
        &self,
        state: &mut ChatState,
        name: &str,
        description: &str,
    ) -> Option<i64> {
        let request = Self::begin_create_project(state, name, description).ok()?;
        let result = self
            .api
            .create_project(&request)
            .await
            .context(ErrorContext::new("create_project"));
        let id = result.as_ref().ok().map(|p| p.id);
        Self::finish_create_project(state, result);
        id
    }

    /// Update the backend badge. A failed probe shows "unknown".
    pub fn apply_status(state: &mut ChatState, result: ChatResult<OllamaStatus>) {
        state.backend_status = match result {
            Ok(status) => {
                if let Some(error) = &status.error {
                    tracing::warn!("Model backend probe reported: {}", error);
                }
                BackendStatus::from(&status)
            }
            Err(err) => {
                tracing::warn!("[{}] status check failed: {}", err.error_code(), err);
                BackendStatus::Unknown
            }
        };
    }

    pub async fn check_ollama_status(&self, state: &mut ChatState) {
        let result = self.api.ollama_status().await;
        Self::apply_status(state, result);
    }
}

/// Reason text for failure alerts: the backend's own message when it sent
/// one, otherwise the generic description.
fn failure_reason(err: &ChatError) -> String {
    use crate::error::NetworkError;

    match err.inner() {
        ChatError::Network(NetworkError::HttpStatus { message, .. }) => message.clone(),
        other => other.user_message(),
    }
}
