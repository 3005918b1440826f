//! Cross-subsystem flows.
//!
//! Each module holds its tests in a `#[cfg(test)] mod tests`, with the mock
//! gateway and prover from [`crate::support`] standing in for the network.

pub mod agent_flows;
pub mod log_flows;
pub mod node_flows;
