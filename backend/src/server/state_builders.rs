//! Assemble the HTTP state from the server configuration.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use tracing::info;

use user_registry::domain::UserRegistryService;
use user_registry::domain::ports::UserStore;
use user_registry::inbound::http::state::HttpState;
use user_registry::outbound::memory::InMemoryUserStore;
use user_registry::outbound::persistence::DieselUserStore;

use super::ServerConfig;

/// Pick the store adapter: PostgreSQL when a pool is configured, otherwise
/// the in-memory collection.
fn build_user_store(config: &ServerConfig) -> Arc<dyn UserStore> {
    match &config.db_pool {
        Some(pool) => {
            info!("using PostgreSQL user store");
            Arc::new(DieselUserStore::new(pool.clone()))
        }
        None => {
            info!("using in-memory user store");
            Arc::new(InMemoryUserStore::new())
        }
    }
}

pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let service = UserRegistryService::new(
        build_user_store(config),
        Arc::new(DefaultClock),
        config.policy,
    );
    web::Data::new(HttpState::from_service(Arc::new(service)))
}
