//! Serving front ends: JSON endpoint and HTML form over one shared predictor.

mod api;
mod form;
mod handlers;
mod state;

pub use api::create_router;
pub use form::PredictForm;
pub use state::AppState;

use crate::config::ServerConfig;
use std::net::SocketAddr;
use tracing::{info, warn};

/// Bind and serve until Ctrl+C.
pub async fn run_server(config: &ServerConfig, state: AppState) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(address = %addr, pid = std::process::id(), "listening");
    info!(url = %format!("http://{}/predict", addr), "JSON endpoint available");
    info!(url = %format!("http://{}/", addr), "form available");

    let shutdown_signal = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("shutdown signal received"),
            Err(e) => {
                warn!(error = %e, "cannot listen for Ctrl+C; serving until killed");
                std::future::pending::<()>().await;
            }
        }
    };
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("server shut down cleanly");
    Ok(())
}
