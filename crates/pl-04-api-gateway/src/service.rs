//! API Gateway service - owns the configuration, the agent slot and the
//! metrics, and runs the HTTP server.

use crate::domain::config::GatewayConfig;
use crate::domain::error::GatewayError;
use crate::middleware::GatewayMetrics;
use crate::router::build_router;
use crate::state::{AgentSlot, AppState};
use axum::Router;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// API Gateway service state
pub struct ApiGatewayService {
    config: GatewayConfig,
    agent: AgentSlot,
    metrics: Arc<GatewayMetrics>,
}

impl ApiGatewayService {
    /// Create a new API Gateway service with an empty agent slot
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayError> {
        config
            .validate()
            .map_err(|e| GatewayError::Config(e.to_string()))?;

        Ok(Self {
            config,
            agent: AgentSlot::new(),
            metrics: Arc::new(GatewayMetrics::new()),
        })
    }

    /// Handle for installing the agent once it is ready
    pub fn agent_slot(&self) -> AgentSlot {
        self.agent.clone()
    }

    /// Get metrics
    pub fn metrics(&self) -> Arc<GatewayMetrics> {
        Arc::clone(&self.metrics)
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Build the HTTP router
    pub fn router(&self) -> Router {
        let state = AppState {
            agent: self.agent.clone(),
            metrics: Arc::clone(&self.metrics),
        };
        build_router(&self.config, state)
    }

    /// Bind the configured address and serve until `shutdown` resolves.
    pub async fn start<F>(&self, shutdown: F) -> Result<(), GatewayError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = self.config.http_addr();
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| GatewayError::Bind(format!("{}: {}", addr, e)))?;
        self.serve(listener, shutdown).await
    }

    /// Serve on an already bound listener until `shutdown` resolves.
    pub async fn serve<F>(&self, listener: TcpListener, shutdown: F) -> Result<(), GatewayError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr: Option<SocketAddr> = listener.local_addr().ok();
        info!(addr = ?addr, agent_ready = self.agent.is_ready(), "[pl-04] HTTP server listening");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| GatewayError::Serve(e.to_string()))?;

        info!("[pl-04] HTTP server stopped");
        Ok(())
    }
}
