//! Listener lifecycle: bind, serve until Ctrl-C, flush counters.

use anyhow::{Context, Result};
use tokio::net::TcpListener;

use abom_core::{emit_server_started, RiskScorer, ScoringConfig, METRICS};

use crate::api::router::build_router;
use crate::api::AppState;
use crate::config::ServerConfig;

pub async fn run(config: ServerConfig) -> Result<()> {
    let scorer = RiskScorer::new(ScoringConfig::default()).context("build risk scorer")?;
    let app = build_router(AppState::new(scorer), &config)?;

    let addr = config.bind_addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("bind {addr}"))?;
    emit_server_started(&listener.local_addr().unwrap_or(addr));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serve HTTP")?;

    METRICS.flush();
    tracing::info!("abomd stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
