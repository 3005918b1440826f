//! Node commands.

pub mod demo;
pub mod fetch;
pub mod serve;

/// Resolves on Ctrl+C.
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "[pl-node] Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    tracing::info!("[pl-node] Shutdown requested");
}
