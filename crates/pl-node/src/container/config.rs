//! # Node Configuration
//!
//! Everything the node needs, read from the process environment.
//!
//! Required: `ETHSTORAGE_PRIVATE_KEY`, `OPACITY_OPENAI_KEY`, `OPACITY_TEAM_ID`,
//! `OPACITY_TEAM_NAME`, `OPACITY_PROVER_URL`. A missing or malformed value is
//! fatal at startup.

use pl_01_blob_store::{BlobStoreConfig, UploadType};
use pl_02_activity_log::{ActivityLogConfig, RecoveryMode};
use pl_03_inference::{AgentConfig, InferenceConfig, LogMode};
use pl_04_api_gateway::GatewayConfig;
use std::env;

/// Complete node configuration.
#[derive(Debug, Clone)]
pub struct NodeConfig {
    /// Blob store client.
    pub store: BlobStoreConfig,
    /// Prover client.
    pub inference: InferenceConfig,
    /// Agent behaviour (write flag, log mode, activity log).
    pub agent: AgentConfig,
    /// HTTP server.
    pub gateway: GatewayConfig,
    /// Log output.
    pub telemetry: TelemetryConfig,
}

impl NodeConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let store = store_from_lookup(&lookup)?;
        let inference = inference_from_lookup(&lookup)?;

        let agent = AgentConfig {
            store_enabled: flag(&lookup, "ETHSTORAGE_ENABLED"),
            log_mode: parsed(&lookup, "ACTIVITY_LOG_MODE")?.unwrap_or(LogMode::Awaited),
            activity_log: ActivityLogConfig {
                recovery: parsed(&lookup, "ACTIVITY_LOG_RECOVERY")?
                    .unwrap_or(RecoveryMode::Store),
                ..Default::default()
            },
            ..Default::default()
        };

        let mut gateway = GatewayConfig::default();
        if let Some(port) = parsed::<u16, _>(&lookup, "PORT")? {
            gateway.http.port = port;
        }

        Ok(Self {
            store,
            inference,
            agent,
            gateway,
            telemetry: TelemetryConfig::from_lookup(&lookup),
        })
    }
}

/// Blob store settings only. Enough for commands that never run inference.
pub fn store_from_lookup<F>(lookup: &F) -> Result<BlobStoreConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let defaults = BlobStoreConfig::default();
    let rpc_url = optional(lookup, "ETHSTORAGE_RPC_URL").unwrap_or(defaults.rpc_url.clone());

    let config = BlobStoreConfig {
        private_key: required(lookup, "ETHSTORAGE_PRIVATE_KEY")?,
        storage_rpc_url: optional(lookup, "ETHSTORAGE_STORAGE_RPC_URL"),
        rpc_url,
        directory_address: optional(lookup, "ETHSTORAGE_DIRECTORY_ADDRESS")
            .unwrap_or(defaults.directory_address.clone()),
        upload_type: parsed::<UploadType, _>(lookup, "ETHSTORAGE_UPLOAD_TYPE")?
            .unwrap_or(defaults.upload_type),
        ..defaults
    };
    config.validate().map_err(ConfigError::Store)?;
    Ok(config)
}

/// Prover settings.
pub fn inference_from_lookup<F>(lookup: &F) -> Result<InferenceConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let config = InferenceConfig {
        api_key: required(lookup, "OPACITY_OPENAI_KEY")?,
        team_id: required(lookup, "OPACITY_TEAM_ID")?,
        team_name: required(lookup, "OPACITY_TEAM_NAME")?,
        prover_url: required(lookup, "OPACITY_PROVER_URL")?,
        ..Default::default()
    };
    config.validate().map_err(ConfigError::Inference)?;
    Ok(config)
}

/// Log output configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// `EnvFilter` directive.
    pub log_level: String,
    /// One JSON object per line instead of human-readable output.
    pub json_logs: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

impl TelemetryConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(&|name: &str| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            log_level: optional(lookup, "PL_LOG_LEVEL")
                .or_else(|| optional(lookup, "RUST_LOG"))
                .unwrap_or_else(|| "info".to_string()),
            json_logs: flag(lookup, "PL_JSON_LOGS"),
        }
    }
}

/// Configuration errors. All of them stop the node.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
    #[error("blob store configuration: {0}")]
    Store(pl_01_blob_store::ConfigError),
    #[error("inference configuration: {0}")]
    Inference(pl_03_inference::domain::ConfigError),
}

fn optional<F>(lookup: &F, name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn required<F>(lookup: &F, name: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    optional(lookup, name).ok_or(ConfigError::Missing(name))
}

/// `1` or `true` (any case) enables; anything else, or absence, disables.
fn flag<F>(lookup: &F, name: &str) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    optional(lookup, name)
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

fn parsed<T, F>(lookup: &F, name: &'static str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    optional(lookup, name)
        .map(|v| {
            v.parse::<T>().map_err(|e| ConfigError::Invalid {
                var: name,
                reason: e.to_string(),
            })
        })
        .transpose()
}
