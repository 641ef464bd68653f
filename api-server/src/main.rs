//! N.E.T.R.A. API Server - Entry point

use std::net::SocketAddr;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use netra_api::{create_router, AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before anything reads the environment
    dotenvy::dotenv().ok();

    let config = Config::from_env();

    // Initialize logging; JSON lines in production
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "netra_api=debug,netra_core=info,tower_http=debug".into());
    let (json, plain) = if config.is_production() {
        (Some(tracing_subscriber::fmt::layer().json()), None)
    } else {
        (None, Some(tracing_subscriber::fmt::layer()))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(json)
        .with(plain)
        .init();

    tracing::info!("N.E.T.R.A. API starting ({})", config.environment);
    tracing::info!("Scan prefix: {}", config.engine.scan_prefix);
    if let Some(model) = &config.engine.model {
        tracing::info!("Model scorer: {}", model);
    }
    if let Some(seed) = config.engine.random_seed {
        tracing::info!("Synthetic sensors seeded with {}", seed);
    }

    let state = AppState::new(config.clone());
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
