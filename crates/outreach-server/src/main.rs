//! Outreach - campaign builder entry point

use anyhow::Result;
use outreach_api::AppState;
use outreach_common::config::Config;
use outreach_storage::db::DatabasePool;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    info!("Starting Outreach server...");

    // Load configuration
    let config = Config::load()?;

    // Initialize database
    let db_pool = DatabasePool::new(&config.database).await?;

    // Run migrations
    db_pool.migrate().await?;

    let bind = format!("{}:{}", config.server.bind_address, config.api.port);
    let state = Arc::new(AppState::new(db_pool, config)?);

    // Start API server
    let api_handle = {
        let state = state.clone();
        let bind = bind.clone();
        tokio::spawn(async move {
            let app = outreach_api::create_router(state);
            let listener = tokio::net::TcpListener::bind(&bind)
                .await
                .expect("Failed to bind API server");
            info!("Starting API server on {}", bind);
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!("API server error: {}", e);
            }
        })
    };

    info!("Outreach server started successfully");

    // Wait for shutdown signal
    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received");

    api_handle.abort();

    info!("Outreach server shutdown complete");

    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,outreach=debug"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_level(true))
        .with(filter)
        .init();
}
