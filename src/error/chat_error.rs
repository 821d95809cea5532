//! Unified error type for the chat client.

use std::fmt;

use super::api::ApiError;
use super::category::ErrorCategory;
use super::context::ErrorContext;
use super::network::NetworkError;
use super::precondition::PreconditionError;

/// Unified error type for the chat client.
///
/// Every failing operation ends up here so the flows can log it once and
/// turn it into a single alert.
#[derive(Debug)]
pub enum ChatError {
    /// Transport and HTTP status failures.
    Network(NetworkError),

    /// Backend-declared failures inside a 2xx response.
    Api(ApiError),

    /// Local checks that prevented a request.
    Precondition(PreconditionError),

    /// Wrapped error with additional context.
    WithContext {
        error: Box<ChatError>,
        context: ErrorContext,
    },
}

impl ChatError {
    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ChatError::Network(err) => match err {
                NetworkError::HttpStatus { .. } if err.is_server_side() => ErrorCategory::Server,
                NetworkError::HttpStatus { .. } | NetworkError::InvalidResponse { .. } => {
                    ErrorCategory::Client
                }
                _ => ErrorCategory::Network,
            },
            ChatError::Api(ApiError::Rejected { .. }) => ErrorCategory::Server,
            ChatError::Api(ApiError::MissingField { .. }) => ErrorCategory::Client,
            ChatError::Precondition(_) => ErrorCategory::User,
            ChatError::WithContext { error, .. } => error.category(),
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            ChatError::Network(err) => err.user_message(),
            ChatError::Api(ApiError::Rejected { message }) => message.clone(),
            ChatError::Api(err) => err.to_string(),
            ChatError::Precondition(err) => err.user_message(),
            ChatError::WithContext { error, .. } => error.user_message(),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            ChatError::Network(err) => err.error_code(),
            ChatError::Api(err) => err.error_code(),
            ChatError::Precondition(err) => err.error_code(),
            ChatError::WithContext { error, .. } => error.error_code(),
        }
    }

    /// Attach context to this error.
    pub fn with_context(self, ctx: ErrorContext) -> Self {
        ChatError::WithContext {
            error: Box::new(self),
            context: ctx,
        }
    }

    /// Get the context if this error has one attached.
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            ChatError::WithContext { context, .. } => Some(context),
            _ => None,
        }
    }

    /// Get the inner error without context.
    pub fn inner(&self) -> &ChatError {
        match self {
            ChatError::WithContext { error, .. } => error.inner(),
            _ => self,
        }
    }

    /// The precondition that failed, if this is a precondition error.
    pub fn precondition(&self) -> Option<&PreconditionError> {
        match self.inner() {
            ChatError::Precondition(err) => Some(err),
            _ => None,
        }
    }
}

impl fmt::Display for ChatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatError::Network(err) => write!(f, "{}", err),
            ChatError::Api(err) => write!(f, "{}", err),
            ChatError::Precondition(err) => write!(f, "{}", err),
            ChatError::WithContext { error, context } => write!(f, "{} ({})", error, context),
        }
    }
}

impl std::error::Error for ChatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ChatError::Network(err) => Some(err),
            ChatError::Api(err) => Some(err),
            ChatError::Precondition(err) => Some(err),
            ChatError::WithContext { error, .. } => error.source(),
        }
    }
}

impl From<NetworkError> for ChatError {
    fn from(err: NetworkError) -> Self {
        ChatError::Network(err)
    }
}

impl From<ApiError> for ChatError {
    fn from(err: ApiError) -> Self {
        ChatError::Api(err)
    }
}

impl From<PreconditionError> for ChatError {
    fn from(err: PreconditionError) -> Self {
        ChatError::Precondition(err)
    }
}

impl From<serde_json::Error> for ChatError {
    fn from(err: serde_json::Error) -> Self {
        ChatError::Network(NetworkError::InvalidResponse {
            message: err.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_categories() {
        let conn: ChatError = NetworkError::ConnectionFailed {
            url: "http://x".to_string(),
            message: "refused".to_string(),
        }
        .into();
        assert_eq!(conn.category(), ErrorCategory::Network);

        let server: ChatError = NetworkError::HttpStatus {
            status: 503,
            message: "down".to_string(),
        }
        .into();
        assert_eq!(server.category(), ErrorCategory::Server);

        let client: ChatError = NetworkError::HttpStatus {
            status: 404,
            message: "missing".to_string(),
        }
        .into();
        assert_eq!(client.category(), ErrorCategory::Client);
    }

    #[test]
    fn test_precondition_is_user_category() {
        let err: ChatError = PreconditionError::NoActiveConversation.into();
        assert_eq!(err.category(), ErrorCategory::User);
        assert_eq!(
            err.user_message(),
            "No active conversation. Please refresh the page."
        );
        assert_eq!(err.precondition(), Some(&PreconditionError::NoActiveConversation));
    }

    #[test]
    fn test_rejected_message_passes_through() {
        let err: ChatError = ApiError::Rejected {
            message: "Agent unavailable".to_string(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Server);
        assert_eq!(err.user_message(), "Agent unavailable");
        assert_eq!(err.error_code(), "E_API_REJECTED");
    }

    #[test]
    fn test_context_wrapping_preserves_inner() {
        let err: ChatError = PreconditionError::EmptyMessage.into();
        let wrapped = err.with_context(ErrorContext::new("send_message").with_conversation_id("5"));

        assert!(wrapped.context().is_some());
        assert_eq!(wrapped.category(), ErrorCategory::User);
        assert_eq!(wrapped.error_code(), "E_PRE_EMPTY");
        assert!(matches!(
            wrapped.inner(),
            ChatError::Precondition(PreconditionError::EmptyMessage)
        ));
        assert!(wrapped.to_string().contains("send_message"));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: ChatError = json_err.into();
        assert!(matches!(
            err,
            ChatError::Network(NetworkError::InvalidResponse { .. })
        ));
    }
}
