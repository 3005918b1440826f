//! # Ports Layer
//!
//! - `inbound`: `AgentApi`, used by the HTTP façade and the binary
//! - `outbound`: `TextGenerator`, the external inference capability

pub mod inbound;
pub mod outbound;

pub use inbound::AgentApi;
pub use outbound::TextGenerator;
