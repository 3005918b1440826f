//! # Inbound Ports (Driving Ports)

use crate::domain::{AgentError, VerifiableResponse};
use async_trait::async_trait;
use pl_02_activity_log::{LogEntry, LogKey};
use serde_json::Value;

/// The agent as seen by its callers.
#[async_trait]
pub trait AgentApi: Send + Sync {
    /// Generate a response for `prompt` on behalf of `identity`.
    ///
    /// Never fails: any error yields a degraded response with a null proof.
    async fn generate(&self, prompt: &str, identity: &str) -> VerifiableResponse;

    /// Append an info entry to the identity's activity log.
    async fn log_info(
        &self,
        identity: &str,
        message: &str,
        metadata: Value,
    ) -> Result<LogKey, AgentError>;

    /// Every readable entry of the identity's activity log, oldest first.
    async fn transactions(&self, identity: &str) -> Result<Vec<LogEntry>, AgentError>;

    /// Whether store writes are enabled.
    fn store_enabled(&self) -> bool;
}
