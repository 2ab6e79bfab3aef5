use std::net::SocketAddr;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use joke_translator::config::Config;
use joke_translator::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("joke_translator=debug,tower_http=debug"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let (config, _) = Config::discover()?;

    let app_state = AppState::new(config.clone())?;
    let app = joke_translator::app(app_state);

    let addr: SocketAddr = format!("{}:{}", config.system_config.host, config.system_config.port)
        .parse()
        .with_context(|| format!("invalid listen address {}", config.system_config.host))?;
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
