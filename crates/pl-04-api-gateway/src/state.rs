//! Shared handler state.
//!
//! The server starts listening before the agent has finished initialising.
//! Handlers see the agent through an [`AgentSlot`] that is empty until
//! initialisation succeeds and is filled exactly once.

use crate::middleware::GatewayMetrics;
use pl_03_inference::AgentApi;
use std::sync::{Arc, OnceLock};

/// Late-bound agent handle
#[derive(Clone, Default)]
pub struct AgentSlot {
    inner: Arc<OnceLock<Arc<dyn AgentApi>>>,
}

impl AgentSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot that is ready from the start
    pub fn ready(agent: Arc<dyn AgentApi>) -> Self {
        let slot = Self::new();
        slot.set(agent);
        slot
    }

    /// Install the agent. Returns false if one was already installed.
    pub fn set(&self, agent: Arc<dyn AgentApi>) -> bool {
        self.inner.set(agent).is_ok()
    }

    pub fn get(&self) -> Option<Arc<dyn AgentApi>> {
        self.inner.get().cloned()
    }

    pub fn is_ready(&self) -> bool {
        self.inner.get().is_some()
    }
}

impl std::fmt::Debug for AgentSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentSlot")
            .field("ready", &self.is_ready())
            .finish()
    }
}

/// State passed to every handler
#[derive(Clone)]
pub struct AppState {
    pub agent: AgentSlot,
    pub metrics: Arc<GatewayMetrics>,
}
