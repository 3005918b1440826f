//! Request signing for directory writes.
//!
//! Each chunk upload carries an HMAC-SHA256 over
//! `address|key|index|sha256(chunk)` keyed with the directory private key.

use crate::domain::StoreError;
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

type HmacSha256 = Hmac<Sha256>;

/// Signs chunk uploads for one directory.
#[derive(Clone)]
pub struct RequestSigner {
    key: Vec<u8>,
    directory: String,
}

impl std::fmt::Debug for RequestSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestSigner")
            .field("directory", &self.directory)
            .finish_non_exhaustive()
    }
}

impl RequestSigner {
    pub fn new(key: Vec<u8>, directory: impl Into<String>) -> Self {
        Self {
            key,
            directory: directory.into(),
        }
    }

    /// Hex signature for one chunk of `file_key`.
    pub fn sign_chunk(&self, file_key: &str, index: u32, chunk: &[u8]) -> Result<String, StoreError> {
        let mut mac = HmacSha256::new_from_slice(&self.key)
            .map_err(|e| StoreError::Config(format!("signing key rejected: {}", e)))?;
        mac.update(self.directory.as_bytes());
        mac.update(b"|");
        mac.update(file_key.as_bytes());
        mac.update(b"|");
        mac.update(index.to_string().as_bytes());
        mac.update(b"|");
        mac.update(chunk_digest(chunk).as_bytes());
        Ok(hex::encode(mac.finalize().into_bytes()))
    }
}

/// Hex SHA-256 of a chunk, as reported in directory metadata.
pub fn chunk_digest(chunk: &[u8]) -> String {
    hex::encode(Sha256::digest(chunk))
}
