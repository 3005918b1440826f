use crate::domain::{entry_key, validate_identity, ActivityLogConfig, LogEntry, LogError};
use crate::ports::{ActivityLogReader, BlobStore, LogScan, ScanEnd};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

/// Reads a log by probing sequences 1, 2, 3, ... until one cannot be read.
pub struct LogReader {
    store: Arc<dyn BlobStore>,
    config: ActivityLogConfig,
}

impl LogReader {
    pub fn new(store: Arc<dyn BlobStore>, config: ActivityLogConfig) -> Self {
        Self { store, config }
    }

    async fn read_one(&self, identity: &str, sequence: u64) -> Result<LogEntry, ScanEnd> {
        let bytes = match self.store.get(&entry_key(identity, sequence)).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return Err(ScanEnd::Missing { sequence }),
            Err(e) => {
                return Err(ScanEnd::ReadFailed {
                    sequence,
                    reason: e.to_string(),
                })
            }
        };

        let mut entry: LogEntry =
            serde_json::from_slice(&bytes).map_err(|e| ScanEnd::Malformed {
                sequence,
                reason: e.to_string(),
            })?;

        // The key is authoritative for both.
        entry.identity = identity.to_string();
        entry.sequence = sequence;
        Ok(entry)
    }
}

#[async_trait]
impl ActivityLogReader for LogReader {
    async fn scan(&self, identity: &str) -> Result<LogScan, LogError> {
        validate_identity(identity)?;

        let mut entries = Vec::new();
        let mut sequence = 1;
        let end = loop {
            if sequence > self.config.max_entries {
                break ScanEnd::LimitReached {
                    limit: self.config.max_entries,
                };
            }
            match self.read_one(identity, sequence).await {
                Ok(entry) => entries.push(entry),
                Err(end) => break end,
            }
            sequence += 1;
        };

        match &end {
            ScanEnd::Missing { sequence } => {
                debug!(identity, count = entries.len(), next = sequence, "[pl-02] Log scan complete");
            }
            ScanEnd::LimitReached { limit } => {
                warn!(identity, limit, "[pl-02] Log scan stopped at entry limit");
            }
            ScanEnd::ReadFailed { sequence, reason } => {
                warn!(identity, sequence, reason = %reason, "[pl-02] Log scan ended by read failure");
            }
            ScanEnd::Malformed { sequence, reason } => {
                warn!(identity, sequence, reason = %reason, "[pl-02] Log scan ended by malformed entry");
            }
        }

        Ok(LogScan { entries, end })
    }
}
