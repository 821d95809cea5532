//! Chat backend API client.
//!
//! Thin typed wrapper over the REST endpoints. Every call returns a
//! [`ChatResult`]: transport failures and non-2xx statuses become
//! [`NetworkError`], undecodable bodies become `InvalidResponse`.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::adapters::ReqwestHttpClient;
use crate::error::{ChatResult, NetworkError};
use crate::models::{
    AgentReply, Conversation, ConversationListResponse, CreateConversationRequest,
    CreateProjectRequest, ImageAttachment, Message, MessageListResponse, OllamaStatus, Project,
    SendMessageResponse,
};
use crate::traits::{Headers, HttpClient, MultipartForm, Response};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// `{error: "..."}` body the backend sends alongside non-2xx statuses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Body of `GET /api/conversations/recent`, which answers with either a
/// conversation or `{message: "No conversations found"}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RecentBody {
    Found(Conversation),
    Empty {
        #[allow(dead_code)]
        message: Option<String>,
    },
}

/// Client for the chat backend.
pub struct ChatApiClient<H: HttpClient = ReqwestHttpClient> {
    /// Base URL without trailing slash
    pub base_url: String,
    http: H,
}

impl ChatApiClient<ReqwestHttpClient> {
    /// Create a client backed by reqwest.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http(base_url, ReqwestHttpClient::new())
    }
}

impl Default for ChatApiClient<ReqwestHttpClient> {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl<H: HttpClient> ChatApiClient<H> {
    /// Create a client over any [`HttpClient`] implementation.
    pub fn with_http(base_url: impl Into<String>, http: H) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, http }
    }

    pub fn http(&self) -> &H {
        &self.http
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn json_headers() -> Headers {
        let mut headers = Headers::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers
    }

    /// Map status and body of a response into a typed value.
    fn decode<T: DeserializeOwned>(response: Response) -> ChatResult<T> {
        if !response.is_success() {
            let message = response
                .json::<ErrorBody>()
                .ok()
                .and_then(|body| body.error)
                .or_else(|| response.text().ok().filter(|t| !t.trim().is_empty()))
                .unwrap_or_else(|| "Unknown error".to_string());
            return Err(NetworkError::HttpStatus {
                status: response.status,
                message,
            }
            .into());
        }
        Ok(response.json::<T>()?)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ChatResult<T> {
        let url = self.url(path);
        tracing::debug!("GET {}", url);
        let response = self
            .http
            .get(&url, &Headers::new())
            .await
            .map_err(|e| NetworkError::from_http(e, &url))?;
        Self::decode(response)
    }

    async fn post_json<B: serde::Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ChatResult<T> {
        let url = self.url(path);
        tracing::debug!("POST {}", url);
        let body = serde_json::to_string(body)?;
        let response = self
            .http
            .post(&url, &body, &Self::json_headers())
            .await
            .map_err(|e| NetworkError::from_http(e, &url))?;
        Self::decode(response)
    }

    /// `GET /api/conversations`, most recently updated first.
    pub async fn list_conversations(&self) -> ChatResult<Vec<Conversation>> {
        let list: ConversationListResponse = self.get_json("/api/conversations").await?;
        Ok(list.conversations)
    }

    /// `GET /api/conversations/recent`; `None` when no conversation exists.
    pub async fn recent_conversation(&self) -> ChatResult<Option<Conversation>> {
        let body: RecentBody = self.get_json("/api/conversations/recent").await?;
        Ok(match body {
            RecentBody::Found(conversation) => Some(conversation),
            RecentBody::Empty { .. } => None,
        })
    }

    /// `POST /api/conversations`
    pub async fn create_conversation(
        &self,
        request: &CreateConversationRequest,
    ) -> ChatResult<Conversation> {
        self.post_json("/api/conversations", request).await
    }

    /// `GET /api/conversations/{id}/messages`, in server order.
    pub async fn fetch_messages(&self, conversation_id: &str) -> ChatResult<Vec<Message>> {
        let path = format!("/api/conversations/{}/messages", conversation_id);
        let list: MessageListResponse = self.get_json(&path).await?;
        Ok(list.messages)
    }

    /// `POST /api/conversations/{id}/messages` as multipart form data.
    ///
    /// The reply is validated: `success: false`, an `error` field or a
    /// missing `response` all fail with [`crate::error::ApiError`].
    pub async fn send_message(
        &self,
        conversation_id: &str,
        text: &str,
        image: Option<&ImageAttachment>,
    ) -> ChatResult<AgentReply> {
        let url = self.url(&format!("/api/conversations/{}/messages", conversation_id));

        let mut form = MultipartForm::new().text("message", text);
        if let Some(image) = image {
            form = form.file(
                "image",
                image.file_name.clone(),
                image.mime_type.clone(),
                image.bytes.clone(),
            );
        }

        tracing::debug!(
            "POST {} (multipart, image={})",
            url,
            image.map(|i| i.file_name.as_str()).unwrap_or("none")
        );
        let response = self
            .http
            .post_multipart(&url, form, &Headers::new())
            .await
            .map_err(|e| NetworkError::from_http(e, &url))?;

        let payload: SendMessageResponse = Self::decode(response)?;
        Ok(payload.into_reply()?)
    }

    /// `GET /api/ollama/status`
    pub async fn ollama_status(&self) -> ChatResult<OllamaStatus> {
        self.get_json("/api/ollama/status").await
    }

    /// `POST /api/projects`
    pub async fn create_project(&self, request: &CreateProjectRequest) -> ChatResult<Project> {
        self.post_json("/api/projects", request).await
    }
}
