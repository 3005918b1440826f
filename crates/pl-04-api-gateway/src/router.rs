//! HTTP router assembly.

use crate::domain::config::GatewayConfig;
use crate::handlers;
use crate::middleware::{create_cors_layer, MetricsLayer, TimeoutLayer, TracingLayer};
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;

/// Build the gateway router with its middleware stack.
pub fn build_router(config: &GatewayConfig, state: AppState) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(create_cors_layer(&config.cors))
        .layer(TracingLayer::new())
        .layer(MetricsLayer::new(state.metrics.clone()))
        .layer(TimeoutLayer::new(config.timeouts.clone()));

    Router::new()
        .route("/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics))
        .route("/api/generate", post(handlers::generate))
        .route("/api/log", post(handlers::append_log))
        .route(
            "/api/transactions/:wallet_address",
            get(handlers::transactions),
        )
        .fallback(handlers::not_found)
        .layer(DefaultBodyLimit::max(config.limits.max_request_size))
        .layer(middleware)
        .with_state(state)
}
