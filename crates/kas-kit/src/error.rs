//! Error types for kas-kit.
//!
//! # Error Hierarchy
//!
//! - [`Error`](enum@Error) - Main error type, returned by every operation
//!   - validation errors, raised synchronously before any request is sent
//!   - [`TransportError`] - failures reported by the [`Transport`](crate::Transport)
//!   - [`Error::Service`] - a `{ code, message }` payload inside a successful response
//!
//! # Catching Validation Errors
//!
//! Validation happens when a call is *prepared*, not when it is awaited, so
//! bad input can be handled without touching the network:
//!
//! ```rust,no_run
//! use kas_kit::*;
//!
//! # async fn example(kas: Kas) -> Result<(), Error> {
//! let options = QueryOptions::builder().size(2000).build();
//! assert!(matches!(options, Err(Error::InvalidOptionRange { .. })));
//!
//! match kas.kip17()?.mint("my-nft", "0xabc", -1, "https://example.com/1.json") {
//!     Err(Error::InvalidIdentifierType(reason)) => println!("rejected: {reason}"),
//!     Err(e) => return Err(e),
//!     Ok(call) => {
//!         call.await?;
//!     }
//! }
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use thiserror::Error;

use crate::types::Service;

// ============================================================================
// Transport Errors
// ============================================================================

/// Errors reported by a transport through its completion handler.
#[derive(Debug, Error)]
pub enum TransportError {
    // ─── Network ───
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Network error: {message}")]
    Network {
        message: String,
        status_code: Option<u16>,
        retryable: bool,
    },

    #[error("Timeout after {0} attempts")]
    Timeout(u32),

    // ─── Remote ───
    #[error("Service error {code} (HTTP {status_code}): {message}")]
    Service {
        status_code: u16,
        code: i64,
        message: String,
    },

    // ─── Response ───
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Transport dropped the request without completing it")]
    Dropped,
}

impl TransportError {
    /// Check if this error is worth retrying.
    pub fn is_retryable(&self) -> bool {
        match self {
            TransportError::Http(e) => e.is_timeout() || e.is_connect(),
            TransportError::Network { retryable, .. } => *retryable,
            TransportError::Timeout(_) => true,
            TransportError::Service { status_code, .. } => is_retryable_status(*status_code),
            _ => false,
        }
    }

    /// Create a network error.
    pub fn network(message: impl Into<String>, status_code: Option<u16>, retryable: bool) -> Self {
        TransportError::Network {
            message: message.into(),
            status_code,
            retryable,
        }
    }

    /// The HTTP status code, when the failure came with one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            TransportError::Network { status_code, .. } => *status_code,
            TransportError::Service { status_code, .. } => Some(*status_code),
            TransportError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Check if an HTTP status code is retryable.
pub(crate) fn is_retryable_status(status: u16) -> bool {
    // 408 Request Timeout, 429 Too Many Requests, 5xx Server Errors
    status == 408 || status == 429 || (500..600).contains(&status)
}

// ============================================================================
// Main Error Type
// ============================================================================

/// Main error type for kas-kit operations.
#[derive(Debug, Error)]
pub enum Error {
    // ─── Validation ───
    #[error("Invalid argument shape: {0}")]
    InvalidArgumentShape(String),

    #[error("Invalid identifier type: {0}")]
    InvalidIdentifierType(String),

    #[error("Invalid type of {key}: {key} should be {expected}")]
    InvalidOptionType { key: String, expected: &'static str },

    #[error("Invalid value of {key}: {reason}")]
    InvalidOptionRange { key: String, reason: String },

    #[error("Invalid query options: only {allowed} can be used")]
    InvalidQueryOptions { allowed: String },

    // ─── Configuration ───
    #[error("{0} API is not initialized. Configure its endpoint on KasBuilder first.")]
    NotInitialized(Service),

    #[error("Unknown endpoint: {0}")]
    UnknownEndpoint(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    // ─── Call ───
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Service error {code}: {message}")]
    Service { code: i64, message: String },

    #[error("Call timed out after {0:?}")]
    Timeout(Duration),

    // ─── Serialization ───
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns true for errors raised while preparing a call, before any
    /// request reached the transport.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::InvalidArgumentShape(_)
                | Error::InvalidIdentifierType(_)
                | Error::InvalidOptionType { .. }
                | Error::InvalidOptionRange { .. }
                | Error::InvalidQueryOptions { .. }
                | Error::NotInitialized(_)
                | Error::UnknownEndpoint(_)
        )
    }

    /// Returns true if the remote service answered with a `{ code, message }`
    /// payload, either in a 2xx body or alongside an error status.
    pub fn is_service_error(&self) -> bool {
        matches!(
            self,
            Error::Service { .. } | Error::Transport(TransportError::Service { .. })
        )
    }

    /// The service error code, if this is a service error.
    pub fn service_code(&self) -> Option<i64> {
        match self {
            Error::Service { code, .. } => Some(*code),
            Error::Transport(TransportError::Service { code, .. }) => Some(*code),
            _ => None,
        }
    }

    pub(crate) fn shape(message: impl Into<String>) -> Self {
        Error::InvalidArgumentShape(message.into())
    }
}
