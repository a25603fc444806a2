//! Error types for the collection API client.
//!
//! # Design
//! The server reports failures as a status plus an optional `detail` string,
//! and callers only ever show that string, so every non-2xx response lands in
//! one `RequestFailed` variant whose `Display` is the message alone. The
//! remaining variants cover failures that never reached a status code or
//! could not be decoded.

use thiserror::Error;

/// Errors returned by the transport, the bindings and the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status. `message` is the response
    /// `detail`, or a generic fallback when the body carried none.
    #[error("{message}")]
    RequestFailed { status: u16, message: String },

    /// The host could not complete the round-trip.
    #[error("network error: {0}")]
    Network(String),

    /// A success body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// A request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The client configuration is unusable.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ApiError {
    /// HTTP status of a `RequestFailed`, `None` for every other variant.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::RequestFailed { status, .. } => Some(*status),
            _ => None,
        }
    }
}
