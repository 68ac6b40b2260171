use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use pto_calendar_backend::config::AppConfig;
use pto_calendar_backend::{create_router, initialize_backend};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging; RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::load()?;
    let bind_address = config.bind_address.clone();

    let app_state = initialize_backend(config).await?;
    let app = create_router(app_state);

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;
    info!("Starting server on {}", bind_address);
    axum::serve(listener, app).await?;

    Ok(())
}
