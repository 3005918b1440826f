//! # Domain Errors
//!
//! `InferenceError` covers the text-generation capability. `AgentError` is
//! what the façade surfaces to its callers; generation itself never fails,
//! it degrades.

use pl_02_activity_log::LogError;
use thiserror::Error;

/// Text generation errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InferenceError {
    /// Network failure before a response was received.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Prover answered with a non-success status.
    #[error("Inference rejected with status {status}: {message}")]
    Rejected { status: u16, message: String },

    /// Prover answered without any generated text.
    #[error("Empty inference response")]
    EmptyResponse,

    /// Client is misconfigured.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for InferenceError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            InferenceError::EmptyResponse
        } else {
            InferenceError::Transport(e.to_string())
        }
    }
}

/// Façade errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AgentError {
    /// Writing or reading the activity log failed.
    #[error("Activity log error: {0}")]
    Store(#[from] LogError),

    /// Store writes are turned off in configuration.
    #[error("Store writes are disabled")]
    StoreDisabled,

    /// A dependency was unreachable during startup.
    #[error("Initialization failed: {0}")]
    Initialization(String),
}
