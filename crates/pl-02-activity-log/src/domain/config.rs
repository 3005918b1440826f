//! Activity log configuration.

use serde::{Deserialize, Serialize};

/// Where a fresh process gets its sequence counters from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecoveryMode {
    /// Seed each counter from the index object and stored entries.
    #[default]
    Store,
    /// Start every counter at 0. Entries from earlier runs get overwritten.
    Memory,
}

impl std::str::FromStr for RecoveryMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "store" => Ok(RecoveryMode::Store),
            "memory" => Ok(RecoveryMode::Memory),
            other => Err(format!("unknown recovery mode: {}", other)),
        }
    }
}

/// Activity log configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityLogConfig {
    pub recovery: RecoveryMode,
    /// Upper bound on store reads spent seeding one counter.
    pub max_recovery_probe: u64,
    /// Upper bound on entries returned by one scan.
    pub max_entries: u64,
    /// Rewrite `{identity}-index.json` after each successful write.
    pub write_index: bool,
}

impl Default for ActivityLogConfig {
    fn default() -> Self {
        Self {
            recovery: RecoveryMode::Store,
            max_recovery_probe: 1024,
            max_entries: 10_000,
            write_index: true,
        }
    }
}

impl ActivityLogConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_entries == 0 {
            return Err(ConfigError::InvalidLimit("max_entries cannot be 0".into()));
        }
        if self.recovery == RecoveryMode::Store && self.max_recovery_probe == 0 {
            return Err(ConfigError::InvalidLimit(
                "max_recovery_probe cannot be 0 with store recovery".into(),
            ));
        }
        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid limit: {0}")]
    InvalidLimit(String),
}
