//! Blob store configuration with validation.

use super::types::UploadType;
use std::time::Duration;

/// Default write endpoint (QuarkChain L2 beta testnet).
pub const DEFAULT_RPC_URL: &str = "https://rpc.beta.testnet.l2.quarkchain.io:8545";

/// Default FlatDirectory address.
pub const DEFAULT_DIRECTORY_ADDRESS: &str = "0xA460C70b474cA4125c35dFaFfC1e83B0122efcaB";

/// FlatDirectory client configuration.
#[derive(Debug, Clone)]
pub struct BlobStoreConfig {
    /// Hex signing key (with or without `0x`).
    pub private_key: String,
    /// Endpoint for writes and liveness.
    pub rpc_url: String,
    /// Endpoint for reads. Falls back to `rpc_url`.
    pub storage_rpc_url: Option<String>,
    /// FlatDirectory address (`0x` + 40 hex).
    pub directory_address: String,
    /// How uploads are carried.
    pub upload_type: UploadType,
    /// Per-request timeout.
    pub request_timeout: Duration,
    /// Connection establishment timeout.
    pub connect_timeout: Duration,
}

impl Default for BlobStoreConfig {
    fn default() -> Self {
        Self {
            private_key: String::new(),
            rpc_url: DEFAULT_RPC_URL.to_string(),
            storage_rpc_url: None,
            directory_address: DEFAULT_DIRECTORY_ADDRESS.to_string(),
            upload_type: UploadType::Blob,
            request_timeout: Duration::from_secs(60),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

impl BlobStoreConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let key = self
            .private_key
            .strip_prefix("0x")
            .unwrap_or(&self.private_key);
        if key.is_empty() {
            return Err(ConfigError::MissingPrivateKey);
        }
        if hex::decode(key).is_err() {
            return Err(ConfigError::InvalidPrivateKey);
        }

        if self.rpc_url.trim().is_empty() {
            return Err(ConfigError::InvalidEndpoint("rpc_url is empty".into()));
        }
        if let Some(url) = &self.storage_rpc_url {
            if url.trim().is_empty() {
                return Err(ConfigError::InvalidEndpoint(
                    "storage_rpc_url is empty".into(),
                ));
            }
        }

        if !is_hex_address(&self.directory_address) {
            return Err(ConfigError::InvalidDirectoryAddress(
                self.directory_address.clone(),
            ));
        }

        if self.request_timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout(
                "request timeout cannot be 0".into(),
            ));
        }

        Ok(())
    }

    /// Endpoint used for reads.
    pub fn read_url(&self) -> &str {
        self.storage_rpc_url.as_deref().unwrap_or(&self.rpc_url)
    }

    /// Signing key bytes. Only meaningful after `validate()` succeeded.
    pub fn key_bytes(&self) -> Result<Vec<u8>, ConfigError> {
        let key = self
            .private_key
            .strip_prefix("0x")
            .unwrap_or(&self.private_key);
        hex::decode(key).map_err(|_| ConfigError::InvalidPrivateKey)
    }
}

/// `0x` followed by exactly 40 hex digits.
pub fn is_hex_address(s: &str) -> bool {
    match s.strip_prefix("0x") {
        Some(rest) => rest.len() == 40 && rest.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}

/// Configuration errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("missing private key for directory signing")]
    MissingPrivateKey,
    #[error("private key is not valid hex")]
    InvalidPrivateKey,
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),
    #[error("invalid directory address: {0}")]
    InvalidDirectoryAddress(String),
    #[error("invalid timeout: {0}")]
    InvalidTimeout(String),
}
