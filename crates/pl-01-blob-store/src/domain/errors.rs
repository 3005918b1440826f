//! # Domain Errors
//!
//! Error types for the Blob Store Client.
//!
//! `NotFound` is the only variant that means "the key was never written".
//! Everything else is a failure to talk to the network or to make sense of
//! its answer.

use thiserror::Error;

/// Blob store error types.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// Key does not exist in the directory.
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Key cannot be addressed by the directory.
    #[error("Invalid key {key:?}: {reason}")]
    InvalidKey {
        /// Offending key
        key: String,
        /// Why it was refused
        reason: &'static str,
    },

    /// Network failure before a response was received.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Gateway answered with a non-success status.
    #[error("Request rejected with status {status}: {message}")]
    Rejected {
        /// HTTP status code
        status: u16,
        /// Response body or reason phrase
        message: String,
    },

    /// Gateway answered with something we could not interpret.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Adapter is misconfigured.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl StoreError {
    /// True when the error means the key is absent rather than unreachable.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            StoreError::InvalidResponse(e.to_string())
        } else {
            StoreError::Transport(e.to_string())
        }
    }
}
