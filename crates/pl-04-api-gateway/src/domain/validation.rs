//! Request body parsing and input checks.
//!
//! Bodies are parsed by hand rather than through `Json<T>` so that an empty
//! or unparseable body gets the same 400 as a missing field.

use super::error::ApiError;
use super::types::{GenerateRequest, LogRequest};
use serde_json::Value;

/// `0x` followed by exactly 40 hex digits.
pub fn is_wallet_address(s: &str) -> bool {
    match s.strip_prefix("0x") {
        Some(rest) => rest.len() == 40 && rest.bytes().all(|b| b.is_ascii_hexdigit()),
        None => false,
    }
}

fn parse_object(body: &[u8]) -> Option<Value> {
    serde_json::from_slice::<Value>(body)
        .ok()
        .filter(Value::is_object)
}

fn non_empty_str(body: &Value, field: &str) -> Option<String> {
    body.get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

pub fn parse_generate_request(body: &[u8]) -> Result<GenerateRequest, ApiError> {
    let body = parse_object(body).unwrap_or(Value::Null);
    let prompt =
        non_empty_str(&body, "prompt").ok_or_else(|| ApiError::bad_request("Prompt is required"))?;
    Ok(GenerateRequest {
        prompt,
        user_address: non_empty_str(&body, "userAddress"),
    })
}

pub fn parse_log_request(body: &[u8]) -> Result<LogRequest, ApiError> {
    let body = parse_object(body).unwrap_or(Value::Null);
    let message = non_empty_str(&body, "message")
        .ok_or_else(|| ApiError::bad_request("Message is required"))?;
    Ok(LogRequest {
        message,
        metadata: body.get("metadata").cloned().unwrap_or(Value::Null),
        user_address: non_empty_str(&body, "userAddress"),
    })
}
