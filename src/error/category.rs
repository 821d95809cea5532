//! Error category classification.
//!
//! Categories decide how a failure is surfaced: user-correctable problems
//! become warnings, everything else becomes a danger alert.

use std::fmt;

use crate::view::AlertLevel;

/// High-level categorization of errors for handling decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Connection failures, timeouts, unreachable backend.
    Network,

    /// Backend errors (HTTP 5xx) and declared application failures.
    Server,

    /// Requests the backend refused (HTTP 4xx) or responses we could not read.
    Client,

    /// User action required (no active conversation, empty project name).
    User,
}

impl ErrorCategory {
    /// Returns a short label for the category suitable for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "network",
            ErrorCategory::Server => "server",
            ErrorCategory::Client => "client",
            ErrorCategory::User => "user",
        }
    }

    /// Alert level used when an error of this category reaches the user.
    pub fn alert_level(&self) -> AlertLevel {
        match self {
            ErrorCategory::User => AlertLevel::Warning,
            _ => AlertLevel::Danger,
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
