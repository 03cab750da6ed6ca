//! Error types for endpoint calls.
//!
//! # Design
//! Every failure of a call lands in exactly one `FetchError` variant and is
//! returned to the caller of that call. Nothing is retried or recovered
//! here. `HttpStatus` keeps the server body verbatim so callers can read
//! server-defined error payloads.

use crate::http::HttpMethod;

/// Errors returned by a dispatched call.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The exchange never produced a response (DNS, TCP, TLS, timeout).
    #[error("transport: {0}")]
    Transport(#[from] TransportError),

    /// The server answered with a non-2xx status.
    #[error("HTTP {code} on {method} {path}: {body}")]
    HttpStatus {
        method: HttpMethod,
        path: String,
        code: u16,
        body: String,
    },

    /// The encryption envelope could not be applied or removed.
    #[error("encryption: {0}")]
    Encryption(#[from] EncryptionError),

    /// A body or query could not be encoded, or a response was not valid JSON.
    #[error("serialization: {0}")]
    Serialization(String),
}

impl FetchError {
    /// Status code of an `HttpStatus` failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::HttpStatus { code, .. } => Some(*code),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Serialization(e.to_string())
    }
}

/// Connection-level failures reported by a [`Transport`](crate::Transport).
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("{0}")]
    Other(String),
}

/// Failures of the encryption envelope.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EncryptionError {
    #[error("endpoint requires encryption but the connection has no password")]
    MissingPassword,

    #[error("malformed envelope: {0}")]
    Malformed(String),

    #[error("envelope failed authentication")]
    Authentication,
}
