//! Service Layer
//!
//! Implements the inbound ports over the blob store.

pub mod allocator;
pub mod reader;
pub mod writer;


pub use allocator::SequenceAllocator;
pub use reader::LogReader;
pub use writer::LogWriter;
