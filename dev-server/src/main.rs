//! Development server for ui work
//!
//! Runs the in-memory api on a fixed port and fills it with the development
//! dataset so every view of the community pages has something to show.
//!
//! Usage: cargo run -p dev-server
//! Set DEV_SERVER_PORT to use a port other than 8000.

use anyhow::{Context, Result};
use test_helpers::mock::DevDataset;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    let subscriber = api::telemetry::get_subscriber("info");
    api::telemetry::init_subscriber(subscriber);

    let port = match std::env::var("DEV_SERVER_PORT") {
        Ok(port) => port.parse().context("DEV_SERVER_PORT must be a port")?,
        Err(_) => 8000,
    };

    info!("Starting community development server");
    let app = test_helpers::spawn_app_on_port(port).await;
    info!("API server running on http://127.0.0.1:{}", app.port);

    let dataset = DevDataset::create(&app).await?;

    info!("Development server ready!");
    info!("   API: http://127.0.0.1:{}", app.port);
    info!(
        "   UI:  cd ui && BACKEND_URL=http://127.0.0.1:{} trunk serve",
        app.port
    );
    dataset.print_summary();
    info!("Press Ctrl+C to shutdown");

    tokio::signal::ctrl_c().await?;
    info!("Shutting down development server");
    Ok(())
}
