//! Server settings loaded via OrthoConfig from CLI flags, `REGISTRY_*`
//! environment variables and configuration files.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use user_registry::domain::{DEFAULT_MINIMUM_AGE_MS, DeletionPolicy};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Invalid values in otherwise well-formed settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("bind address {value:?} is not a socket address")]
    InvalidBindAddr { value: String },
    #[error("minimum delete age must not be negative, got {value}")]
    NegativeMinimumAge { value: i64 },
    #[error("database pool size must be at least 1")]
    EmptyPool,
}

/// Runtime settings for the registry server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "REGISTRY")]
pub struct ServerSettings {
    /// Listen address, `host:port`.
    #[ortho_config(default = String::from(DEFAULT_BIND_ADDR))]
    pub bind_addr: String,
    /// PostgreSQL URL; users are kept in memory when unset.
    pub database_url: Option<String>,
    /// Milliseconds a user must exist before it may be deleted.
    #[ortho_config(default = DEFAULT_MINIMUM_AGE_MS)]
    pub min_delete_age_ms: i64,
    /// Maximum pooled database connections.
    #[ortho_config(default = 10)]
    pub db_pool_max_size: u32,
}

impl ServerSettings {
    /// Parsed listen address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        self.bind_addr
            .parse()
            .map_err(|_| SettingsError::InvalidBindAddr {
                value: self.bind_addr.clone(),
            })
    }

    /// Configured database URL, if any.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref().filter(|url| !url.trim().is_empty())
    }

    /// Deletion policy built from the configured minimum age.
    pub fn deletion_policy(&self) -> Result<DeletionPolicy, SettingsError> {
        let value = self.min_delete_age_ms;
        if value < 0 {
            return Err(SettingsError::NegativeMinimumAge { value });
        }
        Ok(DeletionPolicy::new(value))
    }

    /// Validated pool size.
    pub fn db_pool_max_size(&self) -> Result<u32, SettingsError> {
        match self.db_pool_max_size {
            0 => Err(SettingsError::EmptyPool),
            size => Ok(size),
        }
    }
}
