mod apiservice;
mod azimuth;
mod config;
mod handlers;
mod models;
mod router;
mod topology;
mod utils;

use std::sync::Arc;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use apiservice::{ApiServiceClient, NetworkApi};
use config::Config;

/// Application state shared across handlers
pub struct AppState {
    pub config: Config,
    pub api: Arc<dyn NetworkApi>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tg_azimuth=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let cfg = Config::load();
    tracing::info!("Starting tg-azimuth");
    tracing::info!("API service: {}", cfg.api_service_url);
    tracing::info!("Azimuth tolerance: {} degrees", cfg.azimuth_epsilon);
    match cfg.fallback_azimuth {
        Some(fallback) => tracing::info!("Nodes without wireless peers reset to {}", fallback),
        None => tracing::info!("Nodes without wireless peers are left unchanged"),
    }

    let api = ApiServiceClient::new(
        cfg.api_service_url.clone(),
        cfg.api_service_token.clone(),
        cfg.api_request_timeout,
    )?;

    let state = Arc::new(AppState {
        config: cfg.clone(),
        api: Arc::new(api),
    });

    // Build router
    let app = router::build(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&cfg.listen_addr).await?;
    tracing::info!("tg-azimuth listening on {}", cfg.listen_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("tg-azimuth shutting down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => { sig.recv().await; }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
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
}
