use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use route_server::config::ServerConfig;
use route_server::geocode::{CachedGeocoder, GeocodeClient};
use route_server::network::load_network;
use route_server::planner::Router;
use route_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env()?;

    // Load the network (fail fast if missing or malformed)
    let network = load_network(&config.network_path)?;
    let router = Router::new(network, config.cost.clone());

    let client = GeocodeClient::new(config.geocoder.clone())?;
    let geocoder = CachedGeocoder::new(client, &config.geocode_cache);

    // Build app state
    let state = AppState::new(router, geocoder);

    // Create router
    let app = create_router(state);

    // Bind and serve
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, "Route planner listening");
    info!("  GET  /health             - Health check");
    info!("  GET  /route?from=&to=    - Route between place names");
    info!("  POST /route/coordinates  - Route between coordinates");

    axum::serve(listener, app).await?;
    Ok(())
}
