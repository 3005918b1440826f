//! # Node Container
//!
//! Builds the concrete adapters from [`NodeConfig`] and wires them into the
//! agent.
//!
//! ```text
//! FlatDirectoryClient ──┐
//!                       ├──→ Agent ──→ AgentSlot (pl-04)
//! OpacityClient ────────┘
//! ```

pub mod config;

pub use config::{ConfigError, NodeConfig, TelemetryConfig};

use anyhow::{Context, Result};
use pl_01_blob_store::FlatDirectoryClient;
use pl_03_inference::{Agent, OpacityClient};
use std::sync::Arc;
use tracing::info;

/// Initialised adapters and the agent built on them.
pub struct NodeContainer {
    pub config: NodeConfig,
    pub store: Arc<FlatDirectoryClient>,
    pub agent: Arc<Agent>,
}

impl NodeContainer {
    /// Build every adapter. Nothing is contacted yet.
    pub fn new(config: NodeConfig) -> Result<Self> {
        let store = Arc::new(
            FlatDirectoryClient::new(config.store.clone())
                .context("Failed to create blob store client")?,
        );
        let prover = Arc::new(
            OpacityClient::new(config.inference.clone())
                .context("Failed to create inference client")?,
        );

        info!(
            directory = %config.store.directory_address,
            upload_type = ?config.store.upload_type,
            store_enabled = config.agent.store_enabled,
            log_mode = ?config.agent.log_mode,
            "[pl-node] Adapters created"
        );

        let agent = Arc::new(Agent::new(prover, store.clone(), config.agent.clone()));

        Ok(Self {
            config,
            store,
            agent,
        })
    }
}
