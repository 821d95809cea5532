//! Application-level failures declared by the backend.

use thiserror::Error;

/// The backend answered with 2xx but the payload reports or implies failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// `success: false` or an `error` field in the payload
    #[error("Backend rejected the request: {message}")]
    Rejected { message: String },

    /// A field the client depends on was absent
    #[error("Response is missing required field '{field}'")]
    MissingField { field: &'static str },
}

impl ApiError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Rejected { .. } => "E_API_REJECTED",
            ApiError::MissingField { .. } => "E_API_FIELD",
        }
    }
}
