//! Inference and agent configuration.

use pl_02_activity_log::ActivityLogConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default chat model requested from the prover.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Prover client configuration.
#[derive(Debug, Clone)]
pub struct InferenceConfig {
    pub api_key: String,
    pub team_id: String,
    pub team_name: String,
    pub prover_url: String,
    pub model: String,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            team_id: String::new(),
            team_name: String::new(),
            prover_url: String::new(),
            model: DEFAULT_MODEL.to_string(),
            request_timeout: Duration::from_secs(120),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

impl InferenceConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("api_key", &self.api_key),
            ("team_id", &self.team_id),
            ("team_name", &self.team_name),
            ("prover_url", &self.prover_url),
            ("model", &self.model),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::Missing(name));
            }
        }
        if !self.prover_url.starts_with("http://") && !self.prover_url.starts_with("https://") {
            return Err(ConfigError::InvalidEndpoint(self.prover_url.clone()));
        }
        if self.request_timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout(
                "request timeout cannot be 0".into(),
            ));
        }
        Ok(())
    }
}

/// How generation results reach the activity log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogMode {
    /// Write before responding. A failed write degrades the response.
    #[default]
    Awaited,
    /// Respond first, write on a tracked background task.
    Background,
}

impl std::str::FromStr for LogMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "awaited" => Ok(LogMode::Awaited),
            "background" => Ok(LogMode::Background),
            other => Err(format!("unknown log mode: {}", other)),
        }
    }
}

/// Agent behaviour.
#[derive(Debug, Clone, Default)]
pub struct AgentConfig {
    /// Single switch for every store write path.
    pub store_enabled: bool,
    pub log_mode: LogMode,
    pub activity_log: ActivityLogConfig,
    /// Background log tasks kept for inspection once finished.
    pub max_tracked_tasks: Option<usize>,
}

/// Configuration errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required setting: {0}")]
    Missing(&'static str),
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),
    #[error("invalid timeout: {0}")]
    InvalidTimeout(String),
}
