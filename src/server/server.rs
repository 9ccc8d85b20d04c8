use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{routing::post, Router};
use reqwest::Client;
use tracing::info;

use crate::cache::token_cache::TokenCache;
use crate::config::settings::RelayConfig;
use crate::observability::metrics::{get_metrics, Metrics};
use crate::observability::routes::MetricsState;
use crate::relay::handler::submit;
use crate::sources::oauth2::PasswordGrantSource;
use crate::utils::constants::{BIND_HOST, SUBMIT_PATH};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<RelayConfig>,
    pub client: Client,
    pub token_source: PasswordGrantSource,
    pub token_cache: Option<TokenCache>,
    pub metrics_state: MetricsState,
}

impl AppState {
    pub fn new(config: RelayConfig, client: Client, metrics: &Metrics) -> Self {
        let token_cache = config
            .token_cache
            .enabled
            .then(|| TokenCache::new(&config.token_cache));
        Self {
            token_source: PasswordGrantSource::new(client.clone()),
            client,
            token_cache,
            metrics_state: MetricsState::new(metrics.registry.clone()),
            config: Arc::new(config),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(SUBMIT_PATH, post(submit))
        .merge(state.metrics_state.router(&state.config.metrics))
        .with_state(state)
}

/// Bind on all interfaces and serve until ctrl-c. A bind failure is returned
/// to the caller, which terminates the process.
pub async fn start(config: RelayConfig, client: Client) -> Result<()> {
    let metrics = get_metrics().await;
    let port = config.server.port;
    let app = router(AppState::new(config, client, metrics));

    let bind_addr = format!("{}:{}", BIND_HOST, port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    info!("listening on {}", bind_addr);

    metrics.up.set(1);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    metrics.up.set(0);
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
