//! `pl-node demo`: one generation and one info entry, then exit.

use anyhow::{Context, Result};
use pl_03_inference::{AgentApi, AgentError, VerifiableResponse};
use serde_json::json;
use tracing::{info, warn};

pub const DEMO_PROMPT: &str = "What is the capital of France?";
pub const DEMO_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

/// What the demo produced.
#[derive(Debug)]
pub struct DemoReport {
    pub response: VerifiableResponse,
    /// Key of the info entry, if writes are enabled
    pub logged: Option<String>,
}

/// Run the demo against an initialised agent.
pub async fn run(agent: &dyn AgentApi) -> Result<DemoReport> {
    info!("[pl-node] Generating verifiable text...");
    let response = agent.generate(DEMO_PROMPT, DEMO_ADDRESS).await;
    info!(
        content = %response.content,
        proof_available = !response.proof.is_null(),
        "[pl-node] Generation finished"
    );

    info!("[pl-node] Logging custom information...");
    let metadata = json!({
        "timestamp": chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
        "status": "success",
    });
    let logged = match agent.log_info(DEMO_ADDRESS, "Demo Completed", metadata).await {
        Ok(key) => Some(key.as_key()),
        Err(AgentError::StoreDisabled) => {
            warn!("[pl-node] Store writes disabled, info entry not written");
            None
        }
        Err(e) => return Err(e).context("Failed to log demo completion"),
    };

    info!("[pl-node] Demo completed successfully");
    Ok(DemoReport { response, logged })
}
