use super::{identity_or_anonymous, ready_agent};
use crate::domain::error::{ApiError, ApiResult};
use crate::domain::types::LogResponse;
use crate::domain::validation::parse_log_request;
use crate::state::AppState;
use axum::{extract::State, Json};
use bytes::Bytes;
use tracing::warn;

/// `POST /api/log`
pub async fn append_log(State(state): State<AppState>, body: Bytes) -> ApiResult<Json<LogResponse>> {
    let request = parse_log_request(&body)?;
    let agent = ready_agent(&state)?;

    let identity = identity_or_anonymous(request.user_address);
    match agent
        .log_info(&identity, &request.message, request.metadata)
        .await
    {
        Ok(key) => Ok(Json(LogResponse::from(key))),
        Err(e) => {
            warn!(identity = %identity, error = %e, "[pl-04] Log write failed");
            Err(ApiError::from_log_write(e))
        }
    }
}
