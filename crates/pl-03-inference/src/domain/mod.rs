//! # Domain Layer

pub mod config;
pub mod errors;
pub mod prompt;
pub mod types;

pub use config::{AgentConfig, ConfigError, InferenceConfig, LogMode, DEFAULT_MODEL};
pub use errors::{AgentError, InferenceError};
pub use prompt::{build_prompt, strip_code_fence, SYSTEM_PROMPT};
pub use types::{Generation, VerifiableResponse};
