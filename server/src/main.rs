//! Court Booking Server - Main Entry Point

use anyhow::{Context, Result};
use std::net::SocketAddr;
use tracing::info;

use court_server::{
    api, config,
    permissions::{PermissionChecker, PermissionTable},
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "court_server=debug,tower_http=debug".into()),
        )
        .json()
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting Court Booking Server"
    );

    // Permission table is fixed for the lifetime of the process
    let table = match &config.permissions_file {
        Some(path) => {
            let table = PermissionTable::load(path)
                .with_context(|| format!("Failed to load permissions from {}", path.display()))?;
            info!(path = %path.display(), "Loaded permission table from file");
            table
        }
        None => {
            info!("Using built-in permission table");
            PermissionTable::builtin()
        }
    };
    let roles: Vec<_> = table.roles().map(|r| r.as_str()).collect();
    info!(?roles, "Permission table ready");

    // Build application state
    let state = api::AppState::new(config.clone(), PermissionChecker::new(table));

    // Build router
    let app = api::create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    info!(address = %config.bind_address, "Server listening");

    // Graceful shutdown handler
    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
        info!("Received shutdown signal, cleaning up...");
    };

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal)
    .await?;

    info!("Server shutdown complete");

    Ok(())
}
