//! # Inbound Ports (Driving Ports)
//!
//! The API the inference façade and HTTP layer use to write and enumerate a
//! per-identity activity log.

use crate::domain::{LogEntry, LogError, LogKey, LogPayload};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

/// Why a scan stopped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ScanEnd {
    /// No entry at `sequence`. The normal end of a log.
    Missing { sequence: u64 },
    /// The store failed while reading `sequence`.
    ReadFailed { sequence: u64, reason: String },
    /// The document at `sequence` is not a valid entry.
    Malformed { sequence: u64, reason: String },
    /// `limit` entries were read without reaching the end.
    LimitReached { limit: u64 },
}

impl ScanEnd {
    /// True when the scan ended because the log ended.
    pub fn is_clean(&self) -> bool {
        matches!(self, ScanEnd::Missing { .. })
    }
}

/// Entries read from the start of a log, plus why reading stopped.
#[derive(Debug, Clone, PartialEq)]
pub struct LogScan {
    pub entries: Vec<LogEntry>,
    pub end: ScanEnd,
}

/// Appends entries to a per-identity log.
#[async_trait]
pub trait ActivityLogWriter: Send + Sync {
    /// Allocate the next sequence for `identity` and store `payload` there.
    ///
    /// A store failure consumes the sequence.
    async fn write(&self, identity: &str, payload: LogPayload) -> Result<LogKey, LogError>;

    /// Highest sequence allocated in this process, 0 if none.
    async fn last_sequence(&self, identity: &str) -> u64;

    async fn write_info(
        &self,
        identity: &str,
        message: &str,
        metadata: Value,
    ) -> Result<LogKey, LogError> {
        self.write(identity, LogPayload::info(message, metadata))
            .await
    }

    async fn write_generation(
        &self,
        identity: &str,
        prompt: &str,
        result: Value,
        has_proof: bool,
    ) -> Result<LogKey, LogError> {
        self.write(identity, LogPayload::generation(prompt, result, has_proof))
            .await
    }
}

/// Reconstructs a per-identity log from the store.
#[async_trait]
pub trait ActivityLogReader: Send + Sync {
    /// Read from sequence 1 until the first entry that cannot be read.
    async fn scan(&self, identity: &str) -> Result<LogScan, LogError>;

    /// Entries in ascending sequence order. Any read failure ends the log.
    async fn read_all(&self, identity: &str) -> Result<Vec<LogEntry>, LogError> {
        Ok(self.scan(identity).await?.entries)
    }
}
