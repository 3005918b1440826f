//! # Proofline Node
//!
//! Wires the subsystems together and runs them.
//!
//! ## Startup Sequence
//!
//! 1. Initialise logging (`PL_LOG_LEVEL` / `RUST_LOG`, `PL_JSON_LOGS`)
//! 2. Load [`NodeConfig`] from the environment; missing values are fatal
//! 3. Build the blob store client, the prover client and the agent
//! 4. Bind the HTTP listener (`/health` answers `agentReady: false`)
//! 5. Initialise the agent in the background and fill the gateway's slot
//! 6. On Ctrl+C stop accepting requests and wait for background log writes
//!
//! ## Module Structure
//!
//! - `container/` - configuration and adapter wiring
//! - `commands/` - `serve`, `demo`, `fetch`
//! - `telemetry` - tracing subscriber setup

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod commands;
pub mod container;
pub mod telemetry;

pub use container::{ConfigError, NodeConfig, NodeContainer, TelemetryConfig};
pub use telemetry::init_tracing;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
