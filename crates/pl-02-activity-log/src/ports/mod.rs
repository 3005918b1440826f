//! # Ports Layer
//!
//! - `inbound`: what the rest of Proofline calls (writer, reader)
//! - `outbound`: what the activity log depends on (the blob store)

pub mod inbound;
pub mod outbound;

pub use inbound::{ActivityLogReader, ActivityLogWriter, LogScan, ScanEnd};
pub use outbound::BlobStore;
