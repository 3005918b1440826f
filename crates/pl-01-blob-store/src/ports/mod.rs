//! # Ports Module
//!
//! Outbound port for the storage network and the transfer callbacks.

pub mod outbound;

pub use outbound::*;
