//! Process bootstrap: bind, wire, collect, serve.
//!
//! The listen address is fixed. No graceful shutdown: the server runs until
//! the process exits.

use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;

use hubgate_core::error::{GatewayError, Result};

use crate::app_state::{GreeterState, RepoGatewayState};
use crate::config::{GatewayConfig, MetricsSection};
use crate::obs::{runtime, MetricsRegistry};
use crate::router;

pub const LISTEN_ADDR: &str = "0.0.0.0:8080";

/// Repository gateway. The credential is loaded before anything binds.
pub async fn run_repo_gateway(cfg: GatewayConfig) -> Result<()> {
    let metrics = Arc::new(MetricsRegistry::new());
    let state = RepoGatewayState::bootstrap(&cfg, Arc::clone(&metrics))?;
    serve(router::build_repo_router(state), metrics, &cfg.metrics).await
}

/// Greeter gateway.
pub async fn run_greeter(cfg: GatewayConfig, identity: String) -> Result<()> {
    let metrics = Arc::new(MetricsRegistry::new());
    tracing::info!(%identity, "greeter identity");
    let state = GreeterState::new(Arc::clone(&metrics), identity);
    serve(router::build_greeter_router(state), metrics, &cfg.metrics).await
}

async fn serve(app: Router, metrics: Arc<MetricsRegistry>, mcfg: &MetricsSection) -> Result<()> {
    let listener = TcpListener::bind(LISTEN_ADDR)
        .await
        .map_err(|e| GatewayError::Internal(format!("bind {LISTEN_ADDR} failed: {e}")))?;
    serve_on(listener, app, metrics, mcfg).await
}

/// Start the runtime collector and accept connections on `listener`.
pub async fn serve_on(
    listener: TcpListener,
    app: Router,
    metrics: Arc<MetricsRegistry>,
    mcfg: &MetricsSection,
) -> Result<()> {
    runtime::spawn_collector(metrics, mcfg.interval(), mcfg.timeout());

    let addr = listener
        .local_addr()
        .map_err(|e| GatewayError::Internal(format!("listener addr: {e}")))?;
    tracing::info!(%addr, "starting on {}...", addr.port());

    axum::serve(listener, app)
        .await
        .map_err(|e| GatewayError::Internal(format!("server failed: {e}")))
}
