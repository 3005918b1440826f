//! # PL-02 Activity Log
//!
//! Per-identity, sequence-addressed log kept in the remote blob store.
//!
//! **Subsystem ID:** 02
//! **Architecture:** Hexagonal (Ports/Adapters)
//!
//! ## Addressing
//!
//! Entry `n` of identity `id` lives at `{id}-{n}.json`. Sequences start at 1
//! and are handed out by a per-identity counter guarded by its own async
//! mutex. The log has no directory listing; a reader walks 1, 2, 3, ...
//! until a read fails and treats that point as the end of the log.
//!
//! ```text
//! 0xabc-1.json   {"message":"...", "sequence":1, ...}
//! 0xabc-2.json   {"prompt":"...", "result":{...}, "hasProof":true, ...}
//! 0xabc-index.json  {"identity":"0xabc", "lastSequence":2, ...}
//! ```
//!
//! A failed upload still consumes its sequence. Everything written after it
//! is invisible to the reader, which stops at the hole.
//!
//! ## Module Structure
//!
//! ```text
//! pl-02-activity-log/
//! ├── domain/     # LogEntry, LogPayload, LogKey, LogIndex, config, errors
//! ├── ports/      # ActivityLogWriter, ActivityLogReader (in); BlobStore (out)
//! └── service/    # SequenceAllocator, LogWriter, LogReader
//! ```

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::{
    validate_identity, ActivityLogConfig, LogEntry, LogError, LogIndex, LogKey, LogPayload,
    RecoveryMode, ANONYMOUS_IDENTITY,
};
pub use ports::{ActivityLogReader, ActivityLogWriter, LogScan, ScanEnd};
pub use service::{LogReader, LogWriter, SequenceAllocator};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
