//! # Outbound Ports (Driven Ports)
//!
//! The activity log keeps everything in the blob store owned by pl-01.
//!
//! Production: `pl_01_blob_store::FlatDirectoryClient`
//! Testing: `pl_01_blob_store::InMemoryBlobStore`

pub use pl_01_blob_store::BlobStore;
