use super::ready_agent;
use crate::domain::error::{ApiError, ApiResult};
use crate::domain::types::TransactionsResponse;
use crate::domain::validation::is_wallet_address;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use tracing::{error, info};

/// `GET /api/transactions/:wallet_address`
pub async fn transactions(
    State(state): State<AppState>,
    Path(wallet_address): Path<String>,
) -> ApiResult<Json<TransactionsResponse>> {
    if !is_wallet_address(&wallet_address) {
        return Err(ApiError::bad_request(
            "Invalid wallet address format. Must be a valid Ethereum address.",
        ));
    }
    let agent = ready_agent(&state)?;

    let entries = agent.transactions(&wallet_address).await.map_err(|e| {
        error!(wallet = %wallet_address, error = %e, "[pl-04] Transaction listing failed");
        ApiError::internal("An error occurred while retrieving transactions", e.to_string())
            .as_message()
    })?;

    info!(wallet = %wallet_address, count = entries.len(), "[pl-04] Listed transactions");
    Ok(Json(TransactionsResponse::new(wallet_address, entries)))
}
