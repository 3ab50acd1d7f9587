//! Paylink Service - HTTP API for the checkout flow
//!
//! This is the main entry point for the paylink service.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use paylink_service::{build_gateway, create_router, open_store, AppState, ServiceConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,paylink=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Paylink Service");

    // Load configuration from environment
    let config = ServiceConfig::from_env();

    tracing::info!(
        listen_addr = %config.listen_addr,
        data_dir = %config.data_dir,
        store_backend = ?config.store_backend,
        gateway_mode = ?config.gateway_mode,
        token_configured = %config.payment_api_token.is_some(),
        "Service configuration loaded"
    );

    let store = open_store(&config)?;
    let gateway = build_gateway(&config)?;

    // Build app state
    let state = AppState::new(store, gateway, config.clone());

    // Create the router
    let app = create_router(state);
    tracing::info!("Router configured with all API endpoints");

    // Start HTTP server
    tracing::info!(listen_addr = %config.listen_addr, "Starting HTTP server");
    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
