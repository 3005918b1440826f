//! # Adapters Layer (Hexagonal Architecture)
//!
//! Implements the `BlobStore` port.

mod flat_directory;
mod memory;
mod signing;

pub use flat_directory::FlatDirectoryClient;
pub use memory::InMemoryBlobStore;
pub use signing::{chunk_digest, RequestSigner};
