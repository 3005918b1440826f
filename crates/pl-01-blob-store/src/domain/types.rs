//! Upload/download value types.

use serde::{Deserialize, Serialize};

/// Bytes per chunk when uploading as blobs (4096 field elements x 31 bytes).
pub const BLOB_CHUNK_SIZE: usize = 4096 * 31;

/// Bytes per chunk when uploading as calldata.
pub const CALLDATA_CHUNK_SIZE: usize = 24 * 1024;

/// How content is carried to the storage network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadType {
    /// Transaction calldata (small, expensive).
    Calldata,
    /// Blob-carrying transactions.
    #[default]
    Blob,
}

impl UploadType {
    /// Wire code used by the directory (1 = calldata, 2 = blob).
    pub fn code(&self) -> u8 {
        match self {
            UploadType::Calldata => 1,
            UploadType::Blob => 2,
        }
    }

    /// Maximum chunk size for this upload type.
    pub fn chunk_size(&self) -> usize {
        match self {
            UploadType::Calldata => CALLDATA_CHUNK_SIZE,
            UploadType::Blob => BLOB_CHUNK_SIZE,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UploadType::Calldata => "calldata",
            UploadType::Blob => "blob",
        }
    }
}

impl std::str::FromStr for UploadType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "blob" | "2" => Ok(UploadType::Blob),
            "calldata" | "1" => Ok(UploadType::Calldata),
            other => Err(format!("unknown upload type: {}", other)),
        }
    }
}

/// A single upload.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub key: String,
    pub content: Vec<u8>,
    pub upload_type: UploadType,
}

impl UploadRequest {
    pub fn new(key: impl Into<String>, content: impl Into<Vec<u8>>, upload_type: UploadType) -> Self {
        Self {
            key: key.into(),
            content: content.into(),
            upload_type,
        }
    }

    /// Split content into chunks. Empty content still occupies one (empty) chunk.
    pub fn chunks(&self) -> Vec<&[u8]> {
        if self.content.is_empty() {
            return vec![&self.content[..]];
        }
        self.content.chunks(self.upload_type.chunk_size()).collect()
    }
}

/// Result of a completed upload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadReceipt {
    pub key: String,
    /// Chunks the file consists of.
    pub total_chunks: u32,
    /// Chunks actually sent (unchanged chunks are skipped).
    pub uploaded_chunks: u32,
    pub total_size: u64,
    /// Storage cost reported by the directory, in wei.
    pub total_cost: u64,
}

/// Directory metadata for a stored file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMeta {
    pub chunk_count: u32,
    pub size: u64,
    /// Hex SHA-256 per chunk, when the directory reports them.
    #[serde(default)]
    pub chunk_hashes: Vec<String>,
}
