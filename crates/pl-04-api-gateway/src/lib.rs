//! # PL-04 API Gateway
//!
//! REST interface over the agent: text generation, activity logging and
//! activity listing.
//!
//! **Subsystem ID:** 04
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                    API GATEWAY (pl-04)                     │
//! ├───────────────────────────────────────────────────────────┤
//! │   CORS → Tracing → Metrics → Timeout                      │
//! │                     │                                      │
//! │   GET  /health                  {status, agentReady}       │
//! │   GET  /metrics                 request counters           │
//! │   POST /api/generate            {content, proof}           │
//! │   POST /api/log                 {key, identity, sequence}  │
//! │   GET  /api/transactions/:addr  {walletAddress, ...}       │
//! │                     │                                      │
//! │              AgentSlot (filled once)                       │
//! └─────────────────────┼─────────────────────────────────────┘
//!                       ▼
//!              pl-03 AgentApi
//! ```
//!
//! The server accepts connections before the agent is ready. Until the slot
//! is filled the API routes answer 503, after input validation.
//!
//! ## Usage
//!
//! ```ignore
//! use pl_04_api_gateway::{ApiGatewayService, GatewayConfig};
//!
//! let service = ApiGatewayService::new(GatewayConfig::default())?;
//! let slot = service.agent_slot();
//! tokio::spawn(async move { slot.set(agent); });
//! service.start(shutdown_signal()).await?;
//! ```

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod domain;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod service;
pub mod state;


// Re-exports for public API
pub use domain::config::{parse_duration, GatewayConfig};
pub use domain::error::{ApiError, ApiResult, GatewayError};
pub use domain::types::*;
pub use domain::validation::is_wallet_address;
pub use middleware::{GatewayMetrics, REQUEST_ID_HEADER};
pub use router::build_router;
pub use service::ApiGatewayService;
pub use state::{AgentSlot, AppState};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
