//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`HttpClient`] - HTTP client operations (GET, POST, multipart POST)

pub mod http;

pub use http::{FormPart, Headers, HttpClient, HttpError, MultipartForm, PartValue, Response};
