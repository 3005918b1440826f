//! Log entries, keys and the per-identity index object.

use super::errors::LogError;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Identity used when a caller supplies none.
pub const ANONYMOUS_IDENTITY: &str = "anonymous";

/// Longest identity accepted as a key prefix.
pub const MAX_IDENTITY_LEN: usize = 128;

/// Check that an identity can be used as a key prefix.
pub fn validate_identity(identity: &str) -> Result<(), LogError> {
    let reason = if identity.is_empty() {
        "empty identity"
    } else if identity.len() > MAX_IDENTITY_LEN {
        "identity too long"
    } else if identity
        .chars()
        .any(|c| c == '/' || c == '?' || c == '#' || c.is_whitespace() || c.is_control())
    {
        "identity contains characters not allowed in a key"
    } else {
        return Ok(());
    };

    Err(LogError::InvalidIdentity {
        identity: identity.to_string(),
        reason,
    })
}

/// Current time as RFC 3339 UTC with millisecond precision.
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Address of one entry: `{identity}-{sequence}.json`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LogKey {
    pub identity: String,
    pub sequence: u64,
}

impl LogKey {
    pub fn new(identity: impl Into<String>, sequence: u64) -> Self {
        Self {
            identity: identity.into(),
            sequence,
        }
    }

    /// Blob store key for this entry.
    pub fn as_key(&self) -> String {
        entry_key(&self.identity, self.sequence)
    }
}

impl fmt::Display for LogKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}.json", self.identity, self.sequence)
    }
}

pub fn entry_key(identity: &str, sequence: u64) -> String {
    format!("{}-{}.json", identity, sequence)
}

pub fn index_key(identity: &str) -> String {
    format!("{}-index.json", identity)
}

/// What an entry records.
///
/// Stored flattened into the entry document, so the variant is recognised by
/// its fields rather than a tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LogPayload {
    /// A successful text generation.
    Generation {
        prompt: String,
        result: Value,
        #[serde(rename = "hasProof")]
        has_proof: bool,
    },
    /// A free-form activity message.
    Info {
        message: String,
        #[serde(default)]
        metadata: Value,
    },
}

impl LogPayload {
    pub fn generation(prompt: impl Into<String>, result: Value, has_proof: bool) -> Self {
        LogPayload::Generation {
            prompt: prompt.into(),
            result,
            has_proof,
        }
    }

    pub fn info(message: impl Into<String>, metadata: Value) -> Self {
        LogPayload::Info {
            message: message.into(),
            metadata,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            LogPayload::Generation { .. } => "generation",
            LogPayload::Info { .. } => "info",
        }
    }
}

/// One stored log document.
///
/// `identity` and `sequence` default when absent so documents written
/// without them still parse; the reader fills them from the key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    #[serde(default)]
    pub identity: String,
    #[serde(default)]
    pub sequence: u64,
    #[serde(default)]
    pub timestamp: String,
    #[serde(flatten)]
    pub payload: LogPayload,
}

impl LogEntry {
    /// New entry stamped with the current time.
    pub fn new(identity: impl Into<String>, sequence: u64, payload: LogPayload) -> Self {
        Self {
            identity: identity.into(),
            sequence,
            timestamp: now_timestamp(),
            payload,
        }
    }

    pub fn key(&self) -> LogKey {
        LogKey::new(self.identity.clone(), self.sequence)
    }
}

/// `{identity}-index.json`: last sequence successfully written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogIndex {
    pub identity: String,
    pub last_sequence: u64,
    pub updated_at: String,
}

impl LogIndex {
    pub fn new(identity: impl Into<String>, last_sequence: u64) -> Self {
        Self {
            identity: identity.into(),
            last_sequence,
            updated_at: now_timestamp(),
        }
    }
}
