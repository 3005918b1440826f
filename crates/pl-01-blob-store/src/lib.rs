//! # PL-01 Blob Store Client
//!
//! Key/value access to a remote FlatDirectory blob store.
//!
//! **Subsystem ID:** 01
//! **Architecture:** Hexagonal (Ports/Adapters)
//!
//! ## Purpose
//!
//! Everything Proofline persists lives in a remote storage network that we do
//! not control. This crate hides that network behind a single port:
//!
//! - `put(key, bytes)` uploads a document, chunked as the network requires
//! - `get(key)` downloads it again, `Ok(None)` when the key was never written
//!
//! ## Module Structure
//!
//! ```text
//! pl-01-blob-store/
//! ├── domain/     # StoreError, UploadType, receipts, BlobStoreConfig
//! ├── ports/      # BlobStore, UploadCallback, DownloadCallback
//! └── adapters/   # FlatDirectoryClient (HTTP gateway), InMemoryBlobStore
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use pl_01_blob_store::{BlobStore, BlobStoreConfig, FlatDirectoryClient};
//!
//! let store = FlatDirectoryClient::new(BlobStoreConfig::default())?;
//! store.put("0xabc-1.json", b"{}".to_vec()).await?;
//! let bytes = store.get("0xabc-1.json").await?;
//! ```

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod adapters;
pub mod domain;
pub mod ports;

pub use adapters::{FlatDirectoryClient, InMemoryBlobStore, RequestSigner};
pub use domain::{
    BlobStoreConfig, ConfigError, FileMeta, StoreError, UploadReceipt, UploadRequest, UploadType,
    BLOB_CHUNK_SIZE, CALLDATA_CHUNK_SIZE,
};
pub use ports::{BlobStore, DownloadCallback, LoggingCallback, UploadCallback};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
