//! Error handling for the chat client.
//!
//! - **Error Categories**: classification that picks the alert level
//! - **Domain-specific Errors**: network, application (backend-declared) and
//!   precondition failures
//! - **Unified Error Type**: `ChatError` consolidates them
//! - **Error Context**: operation and conversation attached for logging
//! - **Result Type Alias**: `ChatResult<T>`
//!
//! | Category | Source | Alert |
//! |----------|--------|-------|
//! | Network | connection refused, timeout | danger |
//! | Server | HTTP 5xx, `success: false` | danger |
//! | Client | HTTP 4xx, undecodable body | danger |
//! | User | missing conversation, pending send | warning |

mod api;
mod category;
mod chat_error;
mod context;
mod network;
mod precondition;
mod result;

pub use api::ApiError;
pub use category::ErrorCategory;
pub use chat_error::ChatError;
pub use context::ErrorContext;
pub use network::NetworkError;
pub use precondition::PreconditionError;
pub use result::{ChatResult, ResultExt};
