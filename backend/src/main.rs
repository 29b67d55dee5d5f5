#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), forbid(clippy::expect_used))]
//! Service entry-point: loads settings, wires the REST adapter into the
//! detection service, and serves the report over HTTP.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use folder_consistency::config::ConsistencySettings;
use folder_consistency::inbound::http::health::HealthState;
use server::{ServerConfig, build_detection_service, create_server};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ConsistencySettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let bind_addr = settings.bind_address().map_err(std::io::Error::other)?;
    let detection = build_detection_service(&settings)?;

    let health_state = web::Data::new(HealthState::new());
    let config = ServerConfig::new(bind_addr, detection);
    info!(bind_addr = %config.bind_addr(), "starting HTTP server");
    let server = create_server(health_state.clone(), config)?;
    let result = server.await;
    health_state.mark_unhealthy();
    result
}
