//! The Callee side of the batch-metrics protocol: an HTTP/JSON surface
//! over the dispatch engine.

pub mod routes;
pub mod state;

pub use routes::router;
pub use state::{AppState, SharedState};

use gauge_core::config::ServerConfig;

/// Run the service until cancelled.
pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let state = AppState::from_config(&config);
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "gauge server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
