//! # Proofline Test Suite
//!
//! End-to-end flows that cross subsystem boundaries. Remote services are
//! replaced by in-process axum servers speaking the real wire protocols, so
//! the HTTP adapters are exercised too.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── support/          # Mock FlatDirectory gateway and mock prover
//! └── integration/
//!     ├── log_flows.rs     # Activity log over the directory client
//!     ├── agent_flows.rs   # Gateway router over a real agent and both HTTP adapters
//!     └── node_flows.rs    # pl-node wiring on a real socket
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p pl-tests
//! cargo test -p pl-tests integration::log_flows::
//! ```

pub mod integration;
