//! HTTP server for the error sink

use anyhow::{Context, Result};
use axum::extract::DefaultBodyLimit;
use axum::Router;
use contracts::{ReportSink, ServerConfig};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::routes;

/// Application state shared across handlers
pub struct AppState<S> {
    pub sink: S,
}

impl<S> AppState<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }
}

/// Build the router serving `config.route` with `sink` behind it
pub fn router<S>(sink: S, config: &ServerConfig) -> Router
where
    S: ReportSink + Sync + 'static,
{
    let state = Arc::new(AppState::new(sink));

    Router::new()
        .merge(routes::report_routes::<S>(&config.route))
        .with_state(state)
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .layer(TraceLayer::new_for_http())
}

/// Run the HTTP server until a shutdown signal arrives
pub async fn serve(listener: TcpListener, app: Router) -> Result<()> {
    let addr = listener
        .local_addr()
        .context("Failed to read listener address")?;
    info!(addr = %addr, "Listening for error reports");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("HTTP server stopped");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    warn!("Received shutdown signal, draining connections...");
}
