use anyhow::{Context, Result};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use carta_feed::{AppState, config::Settings, fetcher::FeedFetcher, routes};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file first. Ignore errors (e.g., file not found)
    dotenv::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "carta_feed=info,tower_http=info".into()))
        .with(fmt::layer())
        .init();

    tracing::info!("Initializing carta_feed server...");

    let settings = match Settings::new() {
        Ok(s) => {
            tracing::info!("Configuration loaded successfully.");
            s
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {:#}", e);
            return Err(e);
        }
    };

    for (var, url) in [
        (carta_feed::config::CARTA_URL_VAR, &settings.carta_csv_url),
        (carta_feed::config::VINOS_URL_VAR, &settings.vinos_csv_url),
    ] {
        if url.is_none() {
            tracing::warn!("{} is not set; that feed will report an error", var);
        }
    }
    if settings.debug_csv {
        tracing::info!("CSV diagnostics endpoints enabled.");
    }

    let fallback = settings.fallback_policy()?;
    let fetcher = FeedFetcher::new(settings.cache_ttl())?;
    tracing::info!("Shared HTTP client created.");

    let addr: SocketAddr = settings
        .server_address
        .parse()
        .with_context(|| format!("Invalid server address format: {}", settings.server_address))?;

    let app_state = AppState::new(settings, fetcher, fallback);
    let app = routes::create_router(app_state);

    let listener = match TcpListener::bind(&addr).await {
        Ok(l) => {
            tracing::info!("Server listening on {}", addr);
            l
        }
        Err(e) => {
            tracing::error!("Failed to bind to address {}: {}", addr, e);
            return Err(e.into());
        }
    };

    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
