//! # Domain Errors
//!
//! Error types for the Activity Log.

use pl_01_blob_store::StoreError;
use thiserror::Error;

/// Activity log error types.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LogError {
    /// The blob store refused or failed the operation.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Entry could not be encoded.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Identity cannot be used as a key prefix.
    #[error("Invalid identity {identity:?}: {reason}")]
    InvalidIdentity {
        identity: String,
        reason: &'static str,
    },

    /// Recovery stopped at its probe bound with entries still stored beyond
    /// it. Writing would overwrite one of them.
    #[error("Recovery for {identity:?} found entries past sequence {last} (probe limit {limit})")]
    RecoveryLimit {
        identity: String,
        last: u64,
        limit: u64,
    },
}

impl From<serde_json::Error> for LogError {
    fn from(e: serde_json::Error) -> Self {
        LogError::Serialization(e.to_string())
    }
}

impl LogError {
    /// True for failures of the remote store, as opposed to bad input.
    pub fn is_store(&self) -> bool {
        matches!(self, LogError::Store(_))
    }
}
