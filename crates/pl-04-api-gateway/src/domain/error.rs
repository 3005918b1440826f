//! API Gateway error types.
//!
//! Every failure leaves the gateway as a JSON body with an `error` string and
//! an optional detail field. The detail field is named `details` except on
//! the transactions route, whose clients read `message`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pl_02_activity_log::LogError;
use pl_03_inference::AgentError;
use serde_json::{Map, Value};
use std::fmt;

/// HTTP error returned by a handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// Response status
    pub status: StatusCode,
    /// Short, user-facing description
    pub error: String,
    /// Underlying cause, if any
    pub details: Option<String>,
    /// JSON key used for `details`
    pub details_key: &'static str,
}

impl ApiError {
    /// Create a new API error
    pub fn new(status: StatusCode, error: impl Into<String>) -> Self {
        Self {
            status,
            error: error.into(),
            details: None,
            details_key: "details",
        }
    }

    /// Attach the underlying cause
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Report the cause under `message` instead of `details`
    pub fn as_message(mut self) -> Self {
        self.details_key = "message";
        self
    }

    /// 400 - request is missing or malformed
    pub fn bad_request(error: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error)
    }

    /// 503 - agent still initialising
    pub fn not_ready() -> Self {
        Self::new(StatusCode::SERVICE_UNAVAILABLE, "Agent not ready")
    }

    /// 503 - store writes turned off
    pub fn store_disabled() -> Self {
        Self::new(StatusCode::SERVICE_UNAVAILABLE, "Store writes are disabled")
    }

    /// 502 - the blob store failed
    pub fn bad_gateway(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, error).with_details(details)
    }

    /// 500 - anything else
    pub fn internal(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, error).with_details(details)
    }

    /// 504 - request exceeded its deadline
    pub fn timeout(details: impl Into<String>) -> Self {
        Self::new(StatusCode::GATEWAY_TIMEOUT, "Request timed out").with_details(details)
    }

    /// Map an activity log write failure.
    pub fn from_log_write(err: AgentError) -> Self {
        match err {
            AgentError::StoreDisabled => Self::store_disabled(),
            AgentError::Store(LogError::InvalidIdentity { identity, reason }) => {
                Self::bad_request(format!("Invalid identity {:?}", identity)).with_details(reason)
            }
            AgentError::Store(LogError::Store(e)) => {
                Self::bad_gateway("Failed to write activity log", e.to_string())
            }
            other => Self::internal("Failed to write activity log", other.to_string()),
        }
    }

    /// JSON body
    pub fn body(&self) -> Value {
        let mut body = Map::new();
        body.insert("error".into(), Value::String(self.error.clone()));
        if let Some(details) = &self.details {
            body.insert(self.details_key.into(), Value::String(details.clone()));
        }
        Value::Object(body)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.status.as_u16(), self.error)?;
        if let Some(details) = &self.details {
            write!(f, ": {}", details)?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body())).into_response()
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Gateway-level errors (not HTTP responses)
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Server socket bind error
    #[error("server bind error: {0}")]
    Bind(String),

    /// Server failed while running
    #[error("server error: {0}")]
    Serve(String),
}
