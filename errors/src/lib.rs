//! # Autofill Errors
//!
//! Error taxonomy shared across the autofill service crates.
//!
//! Uses `thiserror` for structured error definitions with named fields so
//! messages carry the backend or model they refer to.

use thiserror::Error;

/// Cache store errors
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Connection to {backend} failed: {reason}")]
    ConnectionError { backend: String, reason: String },

    #[error("Query on {backend} failed: {reason}")]
    QueryError { backend: String, reason: String },

    #[error("{error_type} serialization failed: {reason}")]
    SerializationError { error_type: String, reason: String },
}

/// Upstream completion-model errors
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("HTTP client construction failed: {reason}")]
    ClientBuild { reason: String },

    #[error("Request to model {model} failed: {reason}")]
    Transport { model: String, reason: String },

    #[error("Model {model} returned {status}: {body}")]
    UpstreamStatus {
        model: String,
        status: u16,
        body: String,
    },

    #[error("Model answer had no candidate text")]
    EmptyAnswer,

    #[error("Model answer was not a suggestion array: {reason}")]
    MalformedAnswer { reason: String },
}
