//! Server entry point: loads settings, initialises tracing and starts the
//! HTTP server.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, ServerSettings, create_server};
use user_registry::inbound::http::health::HealthState;
use user_registry::outbound::persistence::{DbPool, PoolConfig};

fn invalid_config(err: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::InvalidInput, err.to_string())
}

async fn build_server_config(settings: &ServerSettings) -> std::io::Result<ServerConfig> {
    let bind_addr = settings.bind_addr().map_err(invalid_config)?;
    let policy = settings.deletion_policy().map_err(invalid_config)?;
    let config = ServerConfig::new(bind_addr, policy);

    let Some(database_url) = settings.database_url() else {
        return Ok(config);
    };
    let pool_config = PoolConfig::new(database_url)
        .with_max_size(settings.db_pool_max_size().map_err(invalid_config)?);
    let pool = DbPool::new(pool_config)
        .await
        .map_err(|err| std::io::Error::other(err.to_string()))?;
    Ok(config.with_db_pool(pool))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load().map_err(invalid_config)?;
    let config = build_server_config(&settings).await?;
    info!(
        bind_addr = %config.bind_addr(),
        persistent = config.uses_database(),
        "starting user registry"
    );

    let health_state = web::Data::new(HealthState::new());
    create_server(health_state, config)?.await
}
