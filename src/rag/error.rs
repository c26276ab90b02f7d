//! RAG transport error types

use thiserror::Error;

/// Transport failure with classification
#[derive(Debug, Error)]
#[error("{message}")]
pub struct RagError {
    pub kind: RagErrorKind,
    pub message: String,
}

impl RagError {
    pub fn new(kind: RagErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(RagErrorKind::Network, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(RagErrorKind::Timeout, message)
    }

    pub fn status(message: impl Into<String>) -> Self {
        Self::new(RagErrorKind::Status, message)
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(RagErrorKind::MalformedResponse, message)
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(RagErrorKind::Unknown, message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RagErrorKind {
    /// Connection refused, DNS, reset
    Network,
    Timeout,
    /// Backend answered with a non-2xx status
    Status,
    /// Body was not a JSON object
    MalformedResponse,
    Unknown,
}
