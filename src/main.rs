//! Reserva API server.
//!
//! Wires the manager dispatcher, the in-process RPC transport, and the
//! HTTP application together and runs them until shutdown.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use reserva_api::AppState;
use reserva_core::config::AppConfig;
use reserva_core::db::NullDataAccess;
use reserva_core::error::AppError;
use reserva_rpc::api::{HostRpcApi, LeaseRpcApi};
use reserva_rpc::{LocalTransport, RpcClient, transport};

#[tokio::main]
async fn main() {
    let env = std::env::var("RESERVA_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Reserva v{}", env!("CARGO_PKG_VERSION"));

    // Manager dispatcher plus the in-process transport that feeds it.
    let dispatcher = Arc::new(reserva_manager::build_dispatcher(&config.manager)?);
    let (transport, rx) = LocalTransport::channel(config.manager.channel_capacity);
    let manager_handle = tokio::spawn(transport::serve(dispatcher, rx));

    let client = RpcClient::new(Arc::new(transport));
    let app_state = AppState {
        config: Arc::new(config.clone()),
        db: Arc::new(NullDataAccess),
        lease_rpc: LeaseRpcApi::new(client.clone()),
        host_rpc: HostRpcApi::new(client),
    };

    let app = reserva_api::app::build_app(app_state)?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("Reserva API listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, starting graceful shutdown...");
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    // The transport sender is dropped with the app; the manager loop
    // drains what is queued and exits.
    let grace = std::time::Duration::from_secs(config.server.shutdown_grace_seconds);
    let _ = tokio::time::timeout(grace, manager_handle).await;

    tracing::info!("Reserva API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
