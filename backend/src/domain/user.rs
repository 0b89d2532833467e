//! User record model.
//!
//! A user record is the only entity the registry manages. Its identifier is
//! generated by the record store, so the domain treats it as opaque text.
//! Name and email constraints are enforced by the registry service at the
//! moment of each write, not by these types: a record read back from the
//! store is accepted as-is.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Validation errors raised when parsing a [`UserId`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserIdValidationError {
    /// The identifier was empty.
    #[error("user id must not be empty")]
    Empty,
    /// The identifier had leading or trailing whitespace.
    #[error("user id must not contain surrounding whitespace")]
    SurroundingWhitespace,
}

/// Store-generated user identifier.
///
/// ## Invariants
/// - non-empty;
/// - no leading or trailing whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Validate and construct a [`UserId`].
    ///
    /// # Examples
    /// ```
    /// use user_registry::domain::UserId;
    ///
    /// let id = UserId::new("Xy12ab").expect("valid id");
    /// assert_eq!(id.as_ref(), "Xy12ab");
    /// assert!(UserId::new(" ").is_err());
    /// ```
    pub fn new(id: impl Into<String>) -> Result<Self, UserIdValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(UserIdValidationError::Empty);
        }
        if id.trim() != id {
            return Err(UserIdValidationError::SurroundingWhitespace);
        }
        Ok(Self(id))
    }

    /// Generate a random UUID v4 identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserId {
    type Error = UserIdValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Document written by Register.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUserDocument {
    /// Display name as submitted.
    pub name: String,
    /// Email as submitted.
    pub email: String,
    /// Creation instant taken from the service clock.
    pub created_at: DateTime<Utc>,
}

/// A persisted user record.
///
/// Serialises as `{"id", "name", "email", "createdAt"}` with an RFC 3339
/// `createdAt`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    id: UserId,
    name: String,
    email: String,
    created_at: DateTime<Utc>,
}

impl UserRecord {
    /// Assemble a record from its stored parts.
    pub fn new(
        id: UserId,
        name: impl Into<String>,
        email: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            created_at,
        }
    }

    /// Build the record a store returns after inserting `document`.
    pub fn from_document(id: UserId, document: NewUserDocument) -> Self {
        let NewUserDocument {
            name,
            email,
            created_at,
        } = document;
        Self::new(id, name, email, created_at)
    }

    /// Store-generated identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Name as registered.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current email.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Creation instant.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
