//! # Domain Layer
//!
//! Entries, keys, configuration and errors. No I/O.

pub mod config;
pub mod entry;
pub mod errors;

pub use config::{ActivityLogConfig, ConfigError, RecoveryMode};
pub use entry::{
    entry_key, index_key, now_timestamp, validate_identity, LogEntry, LogIndex, LogKey,
    LogPayload, ANONYMOUS_IDENTITY, MAX_IDENTITY_LEN,
};
pub use errors::LogError;
