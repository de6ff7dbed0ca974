use api::{
    Config, build,
    store::Store,
    telemetry::{get_subscriber, init_subscriber, log_error},
};

/// Community development API
///
/// Serves the community endpoints from memory. Nothing is persisted; every
/// start begins with the demo users (alice, bob, carol, dave) and no
/// communities.
///
/// Environment variables can be set directly or loaded from a .env file:
/// - IP_ADDRESS: bind address (default 127.0.0.1)
/// - PORT: server port (default 8000, 0 for an os-assigned port)
/// - ALLOWED_ORIGINS: "*" or a comma-separated list of CORS origins
///
/// Example:
/// IP_ADDRESS=127.0.0.1 PORT=8000 ALLOWED_ORIGINS=http://localhost:8080 \
/// cargo run -p api
#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Silently ignored if there is no .env file
    let _ = dotenvy::dotenv();

    init_subscriber(get_subscriber("info"));

    let mut config = Config::from_env()?;
    let server = build(&mut config, Store::with_demo_users())?;
    if let Err(e) = server.await {
        log_error(e);
    }
    Ok(())
}
