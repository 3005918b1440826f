use super::allocator::SequenceAllocator;
use crate::domain::{validate_identity, ActivityLogConfig, LogEntry, LogError, LogKey, LogPayload};
use crate::ports::{ActivityLogWriter, BlobStore};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

/// Writes entries at `{identity}-{sequence}.json`.
///
/// The sequence is allocated before the upload starts. If the upload fails
/// the sequence stays consumed and the log has a permanent gap there; there
/// is no retry and no rollback.
pub struct LogWriter {
    store: Arc<dyn BlobStore>,
    allocator: SequenceAllocator,
}

impl LogWriter {
    pub fn new(store: Arc<dyn BlobStore>, config: ActivityLogConfig) -> Self {
        Self {
            allocator: SequenceAllocator::new(Arc::clone(&store), config),
            store,
        }
    }
}

#[async_trait]
impl ActivityLogWriter for LogWriter {
    async fn write(&self, identity: &str, payload: LogPayload) -> Result<LogKey, LogError> {
        validate_identity(identity)?;

        let sequence = self.allocator.next(identity).await?;
        let kind = payload.kind();
        let entry = LogEntry::new(identity, sequence, payload);
        let key = entry.key();
        let bytes = serde_json::to_vec(&entry)?;

        match self.store.put(&key.as_key(), bytes).await {
            Ok(receipt) => {
                info!(
                    key = %key,
                    kind,
                    size = receipt.total_size,
                    "[pl-02] Log entry stored"
                );
                self.allocator.commit(identity, sequence).await;
                Ok(key)
            }
            Err(e) => {
                warn!(
                    key = %key,
                    kind,
                    error = %e,
                    "[pl-02] Log entry write failed, sequence consumed"
                );
                Err(LogError::Store(e))
            }
        }
    }

    async fn last_sequence(&self, identity: &str) -> u64 {
        self.allocator.last_sequence(identity).await
    }
}
