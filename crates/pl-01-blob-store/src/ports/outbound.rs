//! # Outbound Ports (Driven Ports)
//!
//! The storage network as seen by the rest of Proofline.
//!
//! Production: `FlatDirectoryClient` (adapters/flat_directory.rs)
//! Testing: `InMemoryBlobStore` (adapters/memory.rs)

use crate::domain::{StoreError, UploadReceipt};
use async_trait::async_trait;
use tracing::{debug, info, warn};

/// Abstract interface for the remote blob store.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Upload `content` under `key`, replacing any previous content.
    async fn put(&self, key: &str, content: Vec<u8>) -> Result<UploadReceipt, StoreError>;

    /// Download the content stored under `key`.
    ///
    /// Returns `Ok(None)` when the key does not exist. Every other failure is
    /// an `Err`, so callers can tell absence from an unreachable network.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Liveness check used during startup.
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Progress notifications for a chunked upload.
pub trait UploadCallback: Send + Sync {
    /// `progress` chunks of `count` are done; `is_change` is false when the
    /// chunk already held identical content and was skipped.
    fn on_progress(&self, _progress: u32, _count: u32, _is_change: bool) {}

    fn on_fail(&self, _error: &StoreError) {}

    fn on_finish(&self, _total_chunks: u32, _total_size: u64, _total_cost: u64) {}
}

/// Progress notifications for a chunked download.
pub trait DownloadCallback: Send + Sync {
    fn on_progress(&self, _progress: u32, _count: u32, _chunk: &[u8]) {}

    fn on_fail(&self, _error: &StoreError) {}

    fn on_finish(&self) {}
}

/// Callback that reports transfer progress through `tracing`.
#[derive(Debug, Clone)]
pub struct LoggingCallback {
    key: String,
}

impl LoggingCallback {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl UploadCallback for LoggingCallback {
    fn on_progress(&self, progress: u32, count: u32, is_change: bool) {
        debug!(key = %self.key, progress, count, is_change, "[pl-01] Upload progress");
    }

    fn on_fail(&self, error: &StoreError) {
        warn!(key = %self.key, error = %error, "[pl-01] Upload failed");
    }

    fn on_finish(&self, total_chunks: u32, total_size: u64, total_cost: u64) {
        info!(
            key = %self.key,
            total_chunks,
            total_size,
            total_cost,
            "[pl-01] Upload finished"
        );
    }
}

impl DownloadCallback for LoggingCallback {
    fn on_progress(&self, progress: u32, count: u32, chunk: &[u8]) {
        debug!(key = %self.key, progress, count, chunk_len = chunk.len(), "[pl-01] Download progress");
    }

    fn on_fail(&self, error: &StoreError) {
        if error.is_not_found() {
            debug!(key = %self.key, "[pl-01] Download target absent");
        } else {
            warn!(key = %self.key, error = %error, "[pl-01] Download failed");
        }
    }

    fn on_finish(&self) {
        debug!(key = %self.key, "[pl-01] Download finished");
    }
}
