use tracing::{Level, info};

use server::{AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    info!("Starting fashion autofill server");

    let config = Config::from_env().unwrap_or_default();
    info!("Configuration loaded");

    let state = AppState::from_config(&config).await?;
    let app = server::create_router(state);

    let addr = config.socket_addr()?;
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
