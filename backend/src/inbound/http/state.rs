//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only see the driving ports,
//! so they can be exercised against mocks without any store.

use std::sync::Arc;

use crate::domain::ports::{UserRegistryCommand, UserRegistryQuery};

/// Ports bundle injected into every user handler.
#[derive(Clone)]
pub struct HttpState {
    pub command: Arc<dyn UserRegistryCommand>,
    pub query: Arc<dyn UserRegistryQuery>,
}

impl HttpState {
    /// Bundle the command and query ports.
    pub fn new(command: Arc<dyn UserRegistryCommand>, query: Arc<dyn UserRegistryQuery>) -> Self {
        Self { command, query }
    }

    /// Use one service for both ports.
    ///
    /// ```
    /// use std::sync::Arc;
    /// use mockable::DefaultClock;
    /// use user_registry::domain::{DeletionPolicy, UserRegistryService};
    /// use user_registry::inbound::http::state::HttpState;
    /// use user_registry::outbound::memory::InMemoryUserStore;
    ///
    /// let service = UserRegistryService::new(
    ///     Arc::new(InMemoryUserStore::new()),
    ///     Arc::new(DefaultClock),
    ///     DeletionPolicy::default(),
    /// );
    /// let _state = HttpState::from_service(Arc::new(service));
    /// ```
    pub fn from_service<T>(service: Arc<T>) -> Self
    where
        T: UserRegistryCommand + UserRegistryQuery + 'static,
    {
        Self {
            command: service.clone(),
            query: service,
        }
    }
}
