//! # Domain Module
//!
//! Core types for the Blob Store Client.

pub mod config;
pub mod errors;
pub mod types;

pub use config::{
    is_hex_address, BlobStoreConfig, ConfigError, DEFAULT_DIRECTORY_ADDRESS, DEFAULT_RPC_URL,
};
pub use errors::StoreError;
pub use types::*;
