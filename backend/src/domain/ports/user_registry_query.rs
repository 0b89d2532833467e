//! Driving port for user lookups.

use async_trait::async_trait;

use crate::domain::{Error, UserRecord};

/// Read-only registry operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRegistryQuery: Send + Sync {
    /// Return every user whose name equals `name` exactly.
    ///
    /// # Errors
    /// - `invalid_request` when `name` is empty;
    /// - `not_found` when nobody has that name;
    /// - store failures otherwise.
    async fn find_by_name(&self, name: &str) -> Result<Vec<UserRecord>, Error>;
}
