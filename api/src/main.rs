use anyhow::Result;
use std::net::SocketAddr;

mod handlers;
mod routes;
mod state;

use common::bootstrap;
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = bootstrap::load_settings()?;
    bootstrap::init_telemetry(&settings)?;

    tracing::info!("Starting API server");

    let state = AppState::new(settings);
    tracing::info!(
        host = %state.config.server.host,
        port = %state.config.server.port,
        data_file = %state.data_file.path().display(),
        "Configuration loaded"
    );

    let addr = SocketAddr::from((
        state.config.server.host.parse::<std::net::IpAddr>()?,
        state.config.server.port,
    ));

    // Create router
    let app = routes::create_router(state);

    tracing::info!(addr = %addr, "Starting HTTP server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(bootstrap::shutdown_signal())
        .await?;

    tracing::info!("API server stopped");
    Ok(())
}
