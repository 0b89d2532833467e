//! Driving port for user mutations.
//!
//! HTTP handlers call [`UserRegistryCommand`] to register users, change an
//! email, or delete a user. Every method runs its validations before touching
//! the store and reports failures as domain [`Error`]s.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{Error, UserId};

/// Request to register a new user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserRequest {
    /// Requested display name.
    pub name: String,
    /// Requested email.
    pub email: String,
}

/// Outcome of a successful registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserResponse {
    /// Identifier generated by the store.
    pub id: UserId,
}

/// Request to replace a user's email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmailRequest {
    /// Target user.
    pub user_id: UserId,
    /// Replacement email.
    pub new_email: String,
}

/// Request to delete a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteUserRequest {
    /// Target user.
    pub user_id: UserId,
}

/// Mutating registry operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRegistryCommand: Send + Sync {
    /// Validate and insert a new user.
    ///
    /// # Errors
    /// - `invalid_request` when the name contains Hangul or the email lacks
    ///   the `x@y.z` shape;
    /// - store failures otherwise.
    async fn register(&self, request: RegisterUserRequest) -> Result<RegisterUserResponse, Error>;

    /// Validate and apply a new email without checking the user exists.
    ///
    /// # Errors
    /// - `invalid_request` for a malformed email;
    /// - store failures, including a missing document, otherwise.
    async fn update_email(&self, request: UpdateEmailRequest) -> Result<(), Error>;

    /// Delete a user once it is old enough.
    ///
    /// # Errors
    /// - `not_found` when no such user exists;
    /// - `forbidden` when the user is younger than the deletion threshold;
    /// - store failures otherwise.
    async fn delete(&self, request: DeleteUserRequest) -> Result<(), Error>;
}
