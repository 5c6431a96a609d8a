//! bistro-server binary
//!
//! Connects the store first; the listener is only bound once that succeeds.

use std::net::SocketAddr;

use bistro_server::{AppState, Config, api, init_logger};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenvy::dotenv();

    init_logger();

    let config = Config::from_env()?;
    tracing::info!(
        environment = %config.environment,
        port = config.port,
        backend = %config.database.backend,
        database = %config.database.name,
        payments = config.stripe_secret_key.is_some(),
        "Starting bistro-server"
    );

    let state = match AppState::new(&config).await {
        Ok(state) => state,
        Err(e) => {
            tracing::error!("Could not connect to the database: {e}");
            return Err(e);
        }
    };

    let app = api::create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("bistro-server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("bistro-server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
