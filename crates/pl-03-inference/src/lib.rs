//! # PL-03 Inference Façade
//!
//! Verifiable text generation whose results are recorded in the activity log.
//!
//! **Subsystem ID:** 03
//! **Architecture:** Hexagonal (Ports/Adapters)
//!
//! ## Flow
//!
//! ```text
//! generate(prompt, identity)
//!   ├── TextGenerator::generate(SYSTEM_PROMPT + ". User Query: " + prompt)
//!   ├── strip ```json fence, parse JSON
//!   ├── ActivityLogWriter::write_generation   (awaited or background)
//!   └── { content, proof }
//! ```
//!
//! Failures never escape `generate`: the caller gets
//! `{ content: <raw text>, proof: null }` instead.
//!
//! ## Module Structure
//!
//! ```text
//! pl-03-inference/
//! ├── domain/     # prompt, fence stripping, config, errors
//! ├── ports/      # AgentApi (in), TextGenerator (out)
//! ├── adapters/   # OpacityClient (HTTP prover), MockTextGenerator
//! └── service/    # Agent, LogTaskTracker
//! ```

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::{MockTextGenerator, OpacityClient};
pub use domain::{
    build_prompt, strip_code_fence, AgentConfig, AgentError, Generation, InferenceConfig,
    InferenceError, LogMode, VerifiableResponse, SYSTEM_PROMPT,
};
pub use ports::{AgentApi, TextGenerator};
pub use service::{Agent, LogTask, LogTaskState, LogTaskStats, LogTaskTracker};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
