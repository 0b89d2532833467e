//! User registry domain service.
//!
//! Implements both registry driving ports on top of a [`UserStore`]. Each
//! operation performs at most one read and at most one write against the
//! store; there is no locking, so concurrent requests against the same
//! record interleave freely.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{debug, error, info, warn};

use crate::domain::ports::{
    DeleteUserRequest, RegisterUserRequest, RegisterUserResponse, UpdateEmailRequest, UserField,
    UserPatch, UserRegistryCommand, UserRegistryQuery, UserStore, UserStoreError,
};
use crate::domain::{
    DeletionPolicy, Error, NewUserDocument, UserRecord, contains_disallowed_script,
    is_valid_email_shape,
};

fn map_store_error(err: UserStoreError) -> Error {
    match err {
        UserStoreError::Connection { message } => {
            error!(%message, "user store unavailable");
            Error::service_unavailable(format!("user store unavailable: {message}"))
        }
        other => {
            error!(error = %other, "user store operation failed");
            Error::internal(format!("user store error: {other}"))
        }
    }
}

fn invalid_field(field: &'static str, code: &'static str, message: &str) -> Error {
    Error::invalid_request(message).with_details(json!({ "field": field, "code": code }))
}

fn ensure_allowed_name(name: &str) -> Result<(), Error> {
    if contains_disallowed_script(name) {
        debug!("rejecting name containing Hangul characters");
        return Err(invalid_field(
            "name",
            "disallowed_script",
            "name must not contain Hangul characters",
        ));
    }
    Ok(())
}

fn ensure_email_shape(field: &'static str, email: &str) -> Result<(), Error> {
    if !is_valid_email_shape(email) {
        debug!(field, "rejecting malformed email");
        return Err(invalid_field(
            field,
            "invalid_email_shape",
            "email must have the form name@domain.tld",
        ));
    }
    Ok(())
}

/// Registry service implementing [`UserRegistryCommand`] and
/// [`UserRegistryQuery`].
pub struct UserRegistryService<S: ?Sized> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
    policy: DeletionPolicy,
}

impl<S: ?Sized> Clone for UserRegistryService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            clock: Arc::clone(&self.clock),
            policy: self.policy,
        }
    }
}

impl<S: ?Sized> UserRegistryService<S> {
    /// Create a service over `store`, reading time from `clock`.
    ///
    /// ```rust,no_run
    /// # use std::sync::Arc;
    /// # use mockable::DefaultClock;
    /// # use user_registry::domain::{DeletionPolicy, UserRegistryService};
    /// # use user_registry::outbound::memory::InMemoryUserStore;
    /// let service = UserRegistryService::new(
    ///     Arc::new(InMemoryUserStore::new()),
    ///     Arc::new(DefaultClock),
    ///     DeletionPolicy::default(),
    /// );
    /// # let _ = service;
    /// ```
    pub fn new(store: Arc<S>, clock: Arc<dyn Clock>, policy: DeletionPolicy) -> Self {
        Self {
            store,
            clock,
            policy,
        }
    }
}

#[async_trait]
impl<S> UserRegistryCommand for UserRegistryService<S>
where
    S: UserStore + ?Sized,
{
    async fn register(&self, request: RegisterUserRequest) -> Result<RegisterUserResponse, Error> {
        let RegisterUserRequest { name, email } = request;
        ensure_allowed_name(&name)?;
        ensure_email_shape("email", &email)?;

        let document = NewUserDocument {
            name,
            email,
            created_at: self.clock.utc(),
        };
        let id = self.store.insert(document).await.map_err(map_store_error)?;

        info!(user_id = %id, "user registered");
        Ok(RegisterUserResponse { id })
    }

    async fn update_email(&self, request: UpdateEmailRequest) -> Result<(), Error> {
        let UpdateEmailRequest { user_id, new_email } = request;
        ensure_email_shape("newEmail", &new_email)?;

        self.store
            .update_fields(&user_id, UserPatch::email(new_email))
            .await
            .map_err(map_store_error)?;

        info!(%user_id, "user email updated");
        Ok(())
    }

    async fn delete(&self, request: DeleteUserRequest) -> Result<(), Error> {
        let DeleteUserRequest { user_id } = request;
        let record = self
            .store
            .get_by_id(&user_id)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| Error::not_found(format!("user {user_id} not found")))?;

        let now = self.clock.utc();
        if !self.policy.permits(record.created_at(), now) {
            warn!(
                %user_id,
                minimum_age_ms = self.policy.minimum_age_ms(),
                "deletion refused: user too recent"
            );
            return Err(Error::forbidden(format!(
                "users can only be deleted {} ms after registration",
                self.policy.minimum_age_ms()
            )));
        }

        self.store.delete(&user_id).await.map_err(map_store_error)?;
        info!(%user_id, "user deleted");
        Ok(())
    }
}

#[async_trait]
impl<S> UserRegistryQuery for UserRegistryService<S>
where
    S: UserStore + ?Sized,
{
    async fn find_by_name(&self, name: &str) -> Result<Vec<UserRecord>, Error> {
        if name.is_empty() {
            return Err(invalid_field("name", "missing_field", "name is required"));
        }

        let users = self
            .store
            .query_equals(UserField::Name, name)
            .await
            .map_err(map_store_error)?;

        if users.is_empty() {
            return Err(Error::not_found(format!("no users named {name:?}")));
        }
        Ok(users)
    }
}

#[cfg(test)]
#[path = "user_registry_service_tests.rs"]
mod tests;
