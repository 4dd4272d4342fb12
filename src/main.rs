use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use github_wrapped::{AppState, Config, build_router, server};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "github_wrapped=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::parse();

    tracing::info!(
        bind_address = %config.bind,
        backend_url = %config.backend_url,
        year = config.year,
        request_timeout_secs = config.request_timeout_secs,
        "Configuration loaded"
    );

    let state = AppState::from_config(&config)?;
    let router = build_router(state, config.page_timeout());

    let listener = TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind))?;

    server::run(listener, router).await?;

    Ok(())
}
