//! # Adapters Layer (Hexagonal Architecture)
//!
//! Implements the `TextGenerator` port.

mod mock;
mod opacity;

pub use mock::MockTextGenerator;
pub use opacity::OpacityClient;
