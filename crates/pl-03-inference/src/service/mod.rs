//! Service Layer
//!
//! `Agent` implements `AgentApi` over a `TextGenerator`, the blob store and
//! the activity log.

pub mod agent;
pub mod tracker;


pub use agent::Agent;
pub use tracker::{LogTask, LogTaskState, LogTaskStats, LogTaskTracker};
