//! Domain layer for the API Gateway.

pub mod config;
pub mod error;
pub mod types;
pub mod validation;

pub use config::{ConfigError, CorsConfig, GatewayConfig, HttpConfig, LimitsConfig, TimeoutConfig};
pub use error::{ApiError, ApiResult, GatewayError};
pub use types::{GenerateRequest, HealthResponse, LogRequest, LogResponse, TransactionsResponse};
pub use validation::{is_wallet_address, parse_generate_request, parse_log_request};
