use super::{identity_or_anonymous, ready_agent};
use crate::domain::error::{ApiError, ApiResult};
use crate::domain::validation::parse_generate_request;
use crate::state::AppState;
use axum::{extract::State, Json};
use bytes::Bytes;
use pl_03_inference::VerifiableResponse;
use tracing::{debug, error};

/// `POST /api/generate`
///
/// The agent never fails a generation; problems come back as a degraded
/// `{content, proof: null}` with status 200. The call runs on its own task
/// so a panic inside the agent surfaces here as a 500.
pub async fn generate(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<Json<VerifiableResponse>> {
    let request = parse_generate_request(&body)?;
    let agent = ready_agent(&state)?;

    let identity = identity_or_anonymous(request.user_address);
    debug!(identity = %identity, prompt_len = request.prompt.len(), "[pl-04] Generate request");

    let prompt = request.prompt;
    let task = tokio::spawn(async move { agent.generate(&prompt, &identity).await });

    match task.await {
        Ok(response) => {
            if response.is_degraded() {
                state.metrics.record_degraded();
            }
            Ok(Json(response))
        }
        Err(e) => {
            error!(error = %e, "[pl-04] Generation task failed");
            Err(ApiError::internal("Failed to generate text", e.to_string()))
        }
    }
}
