//! `pl-node serve`: run the HTTP API.
//!
//! The listener is bound first so `/health` answers immediately. The agent
//! is initialised on a separate task and installed into the gateway's slot
//! when its dependencies answer. An initialisation failure stops the node.

use anyhow::{anyhow, Context, Result};
use pl_03_inference::{Agent, AgentError};
use pl_04_api_gateway::{AgentSlot, ApiGatewayService, GatewayConfig};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

/// Initialise `agent` and publish it through `slot`.
pub async fn initialize_agent(agent: Arc<Agent>, slot: AgentSlot) -> Result<(), AgentError> {
    match agent.initialize().await {
        Ok(()) => {
            slot.set(agent);
            info!("[pl-node] Agent initialized successfully");
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "[pl-node] Failed to initialize agent");
            Err(e)
        }
    }
}

/// Bind the configured address and serve until `shutdown` resolves.
pub async fn run<F>(config: GatewayConfig, agent: Arc<Agent>, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = config.http_addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    serve_on(listener, config, agent, shutdown).await
}

/// Serve on an already bound listener.
pub async fn serve_on<F>(
    listener: TcpListener,
    config: GatewayConfig,
    agent: Arc<Agent>,
    shutdown: F,
) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let service = ApiGatewayService::new(config).context("Invalid gateway configuration")?;
    let mut init = tokio::spawn(initialize_agent(Arc::clone(&agent), service.agent_slot()));

    let server = service.serve(listener, shutdown);
    tokio::pin!(server);

    tokio::select! {
        result = &mut server => {
            result.context("HTTP server failed")?;
        }
        joined = &mut init => {
            match joined {
                Ok(Ok(())) => {
                    (&mut server).await.context("HTTP server failed")?;
                }
                Ok(Err(e)) => return Err(e).context("Failed to initialize agent"),
                Err(e) => return Err(anyhow!("agent initialization task failed: {}", e)),
            }
        }
    }

    let pending = agent.tracker().stats().pending;
    if pending > 0 {
        info!(pending, "[pl-node] Waiting for background log writes");
    }
    agent.tracker().wait_idle().await;
    Ok(())
}
