//! FlatDirectory gateway adapter.
//!
//! Implements `BlobStore` over the directory's HTTP gateway. Files are moved
//! in chunks; uploads skip chunks whose content the directory already holds.
//!
//! ```text
//! PUT {rpc}/directories/{address}/files/{key}/chunks/{index}     raw chunk
//! GET {read}/directories/{address}/files/{key}                    FileMeta
//! GET {read}/directories/{address}/files/{key}/chunks/{index}    raw chunk
//! GET {rpc}/health
//! ```

use super::signing::{chunk_digest, RequestSigner};
use crate::domain::{
    BlobStoreConfig, FileMeta, StoreError, UploadReceipt, UploadRequest, BLOB_CHUNK_SIZE,
};
use crate::ports::{BlobStore, DownloadCallback, LoggingCallback, UploadCallback};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use tracing::{debug, info};

/// Gateway answer to a chunk upload.
#[derive(Debug, Deserialize)]
struct ChunkAck {
    #[serde(default)]
    cost: u64,
}

/// HTTP client for a FlatDirectory.
pub struct FlatDirectoryClient {
    client: Client,
    config: BlobStoreConfig,
    signer: RequestSigner,
}

impl FlatDirectoryClient {
    /// Create a new client. Fails on invalid configuration.
    pub fn new(config: BlobStoreConfig) -> Result<Self, StoreError> {
        config
            .validate()
            .map_err(|e| StoreError::Config(e.to_string()))?;
        let key = config
            .key_bytes()
            .map_err(|e| StoreError::Config(e.to_string()))?;

        let client = Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| StoreError::Config(e.to_string()))?;

        let signer = RequestSigner::new(key, config.directory_address.clone());

        Ok(Self {
            client,
            config,
            signer,
        })
    }

    pub fn config(&self) -> &BlobStoreConfig {
        &self.config
    }

    fn file_url(&self, base: &str, key: &str) -> String {
        format!(
            "{}/directories/{}/files/{}",
            base.trim_end_matches('/'),
            self.config.directory_address,
            key
        )
    }

    fn chunk_url(&self, base: &str, key: &str, index: u32) -> String {
        format!("{}/chunks/{}", self.file_url(base, key), index)
    }

    /// Fetch directory metadata for `key`. `Ok(None)` when absent.
    pub async fn file_meta(&self, key: &str) -> Result<Option<FileMeta>, StoreError> {
        validate_key(key)?;
        let response = self
            .client
            .get(self.file_url(self.config.read_url(), key))
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = check_status(response).await?;
        let meta = response.json::<FileMeta>().await?;
        Ok(Some(meta))
    }

    /// Upload a file chunk by chunk, reporting through `callback`.
    pub async fn upload(
        &self,
        request: UploadRequest,
        callback: &dyn UploadCallback,
    ) -> Result<UploadReceipt, StoreError> {
        match self.upload_inner(&request, callback).await {
            Ok(receipt) => {
                callback.on_finish(receipt.total_chunks, receipt.total_size, receipt.total_cost);
                Ok(receipt)
            }
            Err(e) => {
                callback.on_fail(&e);
                Err(e)
            }
        }
    }

    async fn upload_inner(
        &self,
        request: &UploadRequest,
        callback: &dyn UploadCallback,
    ) -> Result<UploadReceipt, StoreError> {
        validate_key(&request.key)?;

        let chunks = request.chunks();
        let count = chunks.len() as u32;
        let size = request.content.len() as u64;

        // Skip chunks only when the stored file has the same shape.
        let existing = self
            .file_meta(&request.key)
            .await?
            .filter(|meta| meta.chunk_count == count && meta.size == size);

        let mut receipt = UploadReceipt {
            key: request.key.clone(),
            total_chunks: count,
            uploaded_chunks: 0,
            total_size: size,
            total_cost: 0,
        };

        for (i, chunk) in chunks.into_iter().enumerate() {
            let index = i as u32;
            let digest = chunk_digest(chunk);

            let unchanged = existing
                .as_ref()
                .and_then(|meta| meta.chunk_hashes.get(i))
                .map(|h| h.eq_ignore_ascii_case(&digest))
                .unwrap_or(false);

            if unchanged {
                debug!(key = %request.key, index, "[pl-01] Chunk unchanged, skipping");
                callback.on_progress(index + 1, count, false);
                continue;
            }

            let signature = self.signer.sign_chunk(&request.key, index, chunk)?;
            let response = self
                .client
                .put(self.chunk_url(&self.config.rpc_url, &request.key, index))
                .header("x-upload-type", request.upload_type.as_str())
                .header("x-chunk-count", count.to_string())
                .header("x-signature", signature)
                .body(chunk.to_vec())
                .send()
                .await?;
            let response = check_status(response).await?;
            let ack = response.json::<ChunkAck>().await?;

            receipt.uploaded_chunks += 1;
            receipt.total_cost = receipt.total_cost.saturating_add(ack.cost);
            callback.on_progress(index + 1, count, true);
        }

        Ok(receipt)
    }

    /// Download a file chunk by chunk, reporting through `callback`.
    ///
    /// An absent key is reported as `StoreError::NotFound`.
    pub async fn download(
        &self,
        key: &str,
        callback: &dyn DownloadCallback,
    ) -> Result<Vec<u8>, StoreError> {
        match self.download_inner(key, callback).await {
            Ok(content) => {
                callback.on_finish();
                Ok(content)
            }
            Err(e) => {
                callback.on_fail(&e);
                Err(e)
            }
        }
    }

    async fn download_inner(
        &self,
        key: &str,
        callback: &dyn DownloadCallback,
    ) -> Result<Vec<u8>, StoreError> {
        let meta = self
            .file_meta(key)
            .await?
            .ok_or_else(|| StoreError::NotFound(key.to_string()))?;

        let max_size = u64::from(meta.chunk_count).saturating_mul(BLOB_CHUNK_SIZE as u64);
        if meta.size > max_size {
            return Err(StoreError::InvalidResponse(format!(
                "metadata for {} claims {} bytes in {} chunks",
                key, meta.size, meta.chunk_count
            )));
        }

        let mut content = Vec::new();
        for index in 0..meta.chunk_count {
            let response = self
                .client
                .get(self.chunk_url(self.config.read_url(), key, index))
                .send()
                .await?;
            let response = check_status(response).await?;
            let chunk = response.bytes().await?;
            callback.on_progress(index + 1, meta.chunk_count, &chunk);
            content.extend_from_slice(&chunk);
            if content.len() as u64 > meta.size {
                return Err(StoreError::InvalidResponse(format!(
                    "{} is larger than its metadata size of {} bytes",
                    key, meta.size
                )));
            }
        }

        if content.len() as u64 != meta.size {
            return Err(StoreError::InvalidResponse(format!(
                "size mismatch for {}: expected {} bytes, got {}",
                key,
                meta.size,
                content.len()
            )));
        }

        Ok(content)
    }
}

#[async_trait]
impl BlobStore for FlatDirectoryClient {
    async fn put(&self, key: &str, content: Vec<u8>) -> Result<UploadReceipt, StoreError> {
        info!(key, size = content.len(), "[pl-01] Uploading content to directory");
        let request = UploadRequest::new(key, content, self.config.upload_type);
        self.upload(request, &LoggingCallback::new(key)).await
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        match self.download(key, &LoggingCallback::new(key)).await {
            Ok(content) => Ok(Some(content)),
            Err(StoreError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let url = format!("{}/health", self.config.rpc_url.trim_end_matches('/'));
        let response = self.client.get(url).send().await?;
        check_status(response).await.map(|_| ())
    }
}

/// Keys become a single path segment.
fn validate_key(key: &str) -> Result<(), StoreError> {
    if key.is_empty() {
        return Err(StoreError::InvalidKey {
            key: key.to_string(),
            reason: "empty key",
        });
    }
    if key.contains('/') || key.contains('?') || key.contains('#') {
        return Err(StoreError::InvalidKey {
            key: key.to_string(),
            reason: "key must be a single path segment",
        });
    }
    Ok(())
}

async fn check_status(response: Response) -> Result<Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response
        .text()
        .await
        .unwrap_or_else(|_| status.canonical_reason().unwrap_or("").to_string());
    Err(StoreError::Rejected {
        status: status.as_u16(),
        message,
    })
}
