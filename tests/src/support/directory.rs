//! In-process FlatDirectory gateway.
//!
//! Checks every chunk signature against [`TEST_KEY_HEX`] and keeps files in
//! memory. Individual keys can be made to refuse uploads.

use super::{spawn_server, TEST_KEY_HEX};
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use parking_lot::Mutex;
use pl_01_blob_store::adapters::chunk_digest;
use pl_01_blob_store::{BlobStoreConfig, FlatDirectoryClient, RequestSigner, UploadType};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;

/// Directory address used by every test client.
pub const DIRECTORY: &str = "0xA460C70b474cA4125c35dFaFfC1e83B0122efcaB";

#[derive(Default)]
pub struct MockDirectory {
    files: Mutex<HashMap<String, Vec<Vec<u8>>>>,
    refused: Mutex<HashSet<String>>,
    down: AtomicBool,
    chunk_puts: AtomicU32,
    bad_signatures: AtomicU32,
    url: Mutex<String>,
}

impl MockDirectory {
    /// Start a gateway on a local port.
    pub async fn spawn() -> Arc<Self> {
        let dir = Arc::new(Self::default());
        let app = Router::new()
            .route("/health", get(health))
            .route("/directories/:address/files/:key", get(file_meta))
            .route(
                "/directories/:address/files/:key/chunks/:index",
                put(put_chunk).get(get_chunk),
            )
            .with_state(Arc::clone(&dir));
        let url = spawn_server(app).await;
        *dir.url.lock() = url;
        dir
    }

    pub fn url(&self) -> String {
        self.url.lock().clone()
    }

    /// Client configuration pointing at this gateway.
    pub fn config(&self, upload_type: UploadType) -> BlobStoreConfig {
        BlobStoreConfig {
            private_key: format!("0x{}", TEST_KEY_HEX),
            rpc_url: self.url(),
            directory_address: DIRECTORY.to_string(),
            upload_type,
            ..Default::default()
        }
    }

    /// A fresh client, as a restarted process would build.
    pub fn client(&self) -> Arc<FlatDirectoryClient> {
        Arc::new(
            FlatDirectoryClient::new(self.config(UploadType::Calldata))
                .expect("valid mock directory config"),
        )
    }

    /// Refuse uploads to `key` with a 500.
    pub fn refuse(&self, key: &str) {
        self.refused.lock().insert(key.to_string());
    }

    /// Answer every request with 503.
    pub fn set_down(&self, down: bool) {
        self.down.store(down, Ordering::SeqCst);
    }

    /// Store raw bytes under `key` as a single chunk.
    pub fn insert_raw(&self, key: &str, content: &[u8]) {
        self.files
            .lock()
            .insert(key.to_string(), vec![content.to_vec()]);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.files.lock().contains_key(key)
    }

    pub fn content(&self, key: &str) -> Option<Vec<u8>> {
        self.files.lock().get(key).map(|chunks| chunks.concat())
    }

    pub fn chunk_puts(&self) -> u32 {
        self.chunk_puts.load(Ordering::SeqCst)
    }

    pub fn bad_signatures(&self) -> u32 {
        self.bad_signatures.load(Ordering::SeqCst)
    }

    fn is_down(&self) -> bool {
        self.down.load(Ordering::SeqCst)
    }
}

fn signer() -> RequestSigner {
    RequestSigner::new(
        hex::decode(TEST_KEY_HEX).expect("hex test key"),
        DIRECTORY,
    )
}

async fn health(State(dir): State<Arc<MockDirectory>>) -> Response {
    if dir.is_down() {
        return StatusCode::SERVICE_UNAVAILABLE.into_response();
    }
    "ok".into_response()
}

async fn put_chunk(
    State(dir): State<Arc<MockDirectory>>,
    Path((_address, key, index)): Path<(String, String, u32)>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if dir.is_down() {
        return (StatusCode::SERVICE_UNAVAILABLE, "gateway down").into_response();
    }
    if dir.refused.lock().contains(&key) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "upload refused").into_response();
    }

    let expected = signer().sign_chunk(&key, index, &body).ok();
    let given = headers
        .get("x-signature")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    if expected.is_none() || expected != given {
        dir.bad_signatures.fetch_add(1, Ordering::SeqCst);
        return (StatusCode::UNAUTHORIZED, "bad signature").into_response();
    }

    let count: usize = headers
        .get("x-chunk-count")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .unwrap_or(1);
    dir.chunk_puts.fetch_add(1, Ordering::SeqCst);

    let mut files = dir.files.lock();
    let chunks = files.entry(key).or_default();
    chunks.resize(count, Vec::new());
    if let Some(slot) = chunks.get_mut(index as usize) {
        *slot = body.to_vec();
    }
    Json(serde_json::json!({ "cost": 1 })).into_response()
}

async fn file_meta(
    State(dir): State<Arc<MockDirectory>>,
    Path((_address, key)): Path<(String, String)>,
) -> Response {
    if dir.is_down() {
        return StatusCode::SERVICE_UNAVAILABLE.into_response();
    }
    let files = dir.files.lock();
    match files.get(&key) {
        Some(chunks) => Json(serde_json::json!({
            "chunkCount": chunks.len(),
            "size": chunks.iter().map(|c| c.len()).sum::<usize>(),
            "chunkHashes": chunks.iter().map(|c| chunk_digest(c)).collect::<Vec<_>>(),
        }))
        .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn get_chunk(
    State(dir): State<Arc<MockDirectory>>,
    Path((_address, key, index)): Path<(String, String, usize)>,
) -> Response {
    if dir.is_down() {
        return StatusCode::SERVICE_UNAVAILABLE.into_response();
    }
    let files = dir.files.lock();
    match files.get(&key).and_then(|c| c.get(index)) {
        Some(chunk) => chunk.clone().into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
