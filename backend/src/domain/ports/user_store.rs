//! Driven port for the user document store.
//!
//! The store is an external collaborator keyed by identifiers it generates
//! itself. It supports insert, fetch by id, single-field equality queries,
//! partial updates and deletes. Adapters normalise `createdAt` to
//! `DateTime<Utc>` before returning records.

use async_trait::async_trait;

use crate::domain::{NewUserDocument, UserId, UserRecord};

use super::define_port_error;

define_port_error! {
    /// Failures reported by user store adapters.
    pub enum UserStoreError {
        /// The backing store could not be reached.
        Connection { message: String } => "user store connection failed: {message}",
        /// A read or write failed during execution.
        Query { message: String } => "user store query failed: {message}",
        /// A partial update targeted a document that does not exist.
        MissingDocument { id: String } => "no user document with id {id}",
        /// A stored document could not be decoded.
        CorruptDocument { id: String, message: String } => "user document {id} is corrupt: {message}",
    }
}

/// Fields that support equality queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserField {
    /// The `name` field.
    Name,
    /// The `email` field.
    Email,
}

impl UserField {
    /// Field name as stored in documents.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
        }
    }
}

/// Partial update applied by [`UserStore::update_fields`].
///
/// Only the email is ever mutable; `None` leaves it untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    /// Replacement email.
    pub email: Option<String>,
}

impl UserPatch {
    /// Patch replacing only the email.
    pub fn email(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
        }
    }

    /// Whether the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.email.is_none()
    }
}

/// Document collection holding user records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a document and return the identifier the store generated.
    async fn insert(&self, document: NewUserDocument) -> Result<UserId, UserStoreError>;

    /// Fetch a record by identifier.
    async fn get_by_id(&self, id: &UserId) -> Result<Option<UserRecord>, UserStoreError>;

    /// Return every record whose `field` equals `value` exactly, in store
    /// order.
    async fn query_equals(
        &self,
        field: UserField,
        value: &str,
    ) -> Result<Vec<UserRecord>, UserStoreError>;

    /// Apply `patch` to the record. Fails with
    /// [`UserStoreError::MissingDocument`] when no such record exists.
    async fn update_fields(&self, id: &UserId, patch: UserPatch) -> Result<(), UserStoreError>;

    /// Delete the record. Deleting an absent record succeeds.
    async fn delete(&self, id: &UserId) -> Result<(), UserStoreError>;
}
