//! # Outbound Ports (Driven Ports)
//!
//! Production: `OpacityClient` (adapters/opacity.rs)
//! Testing: `MockTextGenerator` (adapters/mock.rs)

use crate::domain::{Generation, InferenceError};
use async_trait::async_trait;

/// Verifiable text generation.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text for a fully assembled prompt.
    async fn generate(&self, prompt: &str) -> Result<Generation, InferenceError>;

    /// Readiness check used during startup.
    async fn health(&self) -> Result<(), InferenceError> {
        Ok(())
    }
}
