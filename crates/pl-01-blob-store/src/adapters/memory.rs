use crate::domain::{StoreError, UploadReceipt, UploadRequest, UploadType};
use crate::ports::BlobStore;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

/// In-memory blob store for tests and local runs.
///
/// Supports failure injection so callers can exercise transport errors
/// without a network.
#[derive(Default)]
pub struct InMemoryBlobStore {
    data: RwLock<HashMap<String, Vec<u8>>>,
    failing_keys: RwLock<HashSet<String>>,
    fail_puts: AtomicBool,
    fail_gets: AtomicBool,
    latency: Option<Duration>,
    puts: AtomicU64,
    gets: AtomicU64,
}

impl InMemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every operation, so concurrent callers interleave.
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency: Some(latency),
            ..Self::default()
        }
    }

    /// Make every `put` fail with a transport error.
    pub fn set_fail_puts(&self, fail: bool) {
        self.fail_puts.store(fail, Ordering::SeqCst);
    }

    /// Make every `get` fail with a transport error.
    pub fn set_fail_gets(&self, fail: bool) {
        self.fail_gets.store(fail, Ordering::SeqCst);
    }

    /// Make `put` and `get` fail for one key only.
    pub fn fail_key(&self, key: impl Into<String>) {
        self.failing_keys.write().insert(key.into());
    }

    /// Store bytes directly, bypassing failure injection.
    pub fn insert_raw(&self, key: impl Into<String>, content: impl Into<Vec<u8>>) {
        self.data.write().insert(key.into(), content.into());
    }

    pub fn contains(&self, key: &str) -> bool {
        self.data.read().contains_key(key)
    }

    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<_> = self.data.read().keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }

    /// Number of `put` calls attempted.
    pub fn put_count(&self) -> u64 {
        self.puts.load(Ordering::Relaxed)
    }

    /// Number of `get` calls attempted.
    pub fn get_count(&self) -> u64 {
        self.gets.load(Ordering::Relaxed)
    }

    async fn delay(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }

    fn injected_failure(&self, key: &str, global: &AtomicBool) -> Option<StoreError> {
        if global.load(Ordering::SeqCst) || self.failing_keys.read().contains(key) {
            return Some(StoreError::Transport(format!(
                "injected failure for {}",
                key
            )));
        }
        None
    }
}

#[async_trait]
impl BlobStore for InMemoryBlobStore {
    async fn put(&self, key: &str, content: Vec<u8>) -> Result<UploadReceipt, StoreError> {
        self.puts.fetch_add(1, Ordering::Relaxed);
        self.delay().await;

        if let Some(err) = self.injected_failure(key, &self.fail_puts) {
            return Err(err);
        }

        let request = UploadRequest::new(key, content, UploadType::Blob);
        let total_chunks = request.chunks().len() as u32;
        let total_size = request.content.len() as u64;
        self.data.write().insert(request.key, request.content);

        Ok(UploadReceipt {
            key: key.to_string(),
            total_chunks,
            uploaded_chunks: total_chunks,
            total_size,
            total_cost: 0,
        })
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        self.gets.fetch_add(1, Ordering::Relaxed);
        self.delay().await;

        if let Some(err) = self.injected_failure(key, &self.fail_gets) {
            return Err(err);
        }

        Ok(self.data.read().get(key).cloned())
    }
}
