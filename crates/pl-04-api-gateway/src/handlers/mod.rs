//! Route handlers.
//!
//! Each handler validates its input first and only then looks at the agent
//! slot, so malformed requests get a 4xx even while the agent is starting.

mod append;
mod generate;
mod status;
mod transactions;

pub use append::append_log;
pub use generate::generate;
pub use status::{health, metrics, not_found};
pub use transactions::transactions;

use crate::domain::error::ApiError;
use crate::state::AppState;
use pl_02_activity_log::ANONYMOUS_IDENTITY;
use pl_03_inference::AgentApi;
use std::sync::Arc;

/// The installed agent, or 503.
fn ready_agent(state: &AppState) -> Result<Arc<dyn AgentApi>, ApiError> {
    state.agent.get().ok_or_else(ApiError::not_ready)
}

fn identity_or_anonymous(user_address: Option<String>) -> String {
    user_address.unwrap_or_else(|| ANONYMOUS_IDENTITY.to_string())
}
