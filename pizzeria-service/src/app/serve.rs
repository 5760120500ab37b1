use std::net::SocketAddr;

use pizzeria_service::config::Config;
use pizzeria_service::handlers::{app, AppState};
use tracing::info;

pub async fn main(config: &Config, listen: SocketAddr) -> Result<(), Box<dyn std::error::Error>> {
    let store = config.store()?;
    store.run_migrations()?;

    let app = app(AppState { store });

    let listener = tokio::net::TcpListener::bind(listen).await?;
    info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
