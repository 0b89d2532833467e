//! Process-local document store for user records.
//!
//! Documents live in an insertion-ordered `Vec` behind a `RwLock`. The lock is
//! held for a single operation and never across an `.await`. `createdAt` is
//! kept in whatever [`StoredTimestamp`] shape it was written with and
//! normalised on the way out, so imported documents carrying epoch millis or
//! RFC 3339 text read back exactly like native ones.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{UserField, UserPatch, UserStore, UserStoreError};
use crate::domain::{NewUserDocument, StoredTimestamp, UserId, UserRecord};

#[derive(Debug, Clone)]
struct StoredDocument {
    id: UserId,
    name: String,
    email: String,
    created_at: StoredTimestamp,
}

impl StoredDocument {
    fn field(&self, field: UserField) -> &str {
        match field {
            UserField::Name => &self.name,
            UserField::Email => &self.email,
        }
    }

    fn to_record(&self) -> Result<UserRecord, UserStoreError> {
        let created_at = self
            .created_at
            .clone()
            .normalize()
            .map_err(|err| UserStoreError::corrupt_document(self.id.as_ref(), err.to_string()))?;
        Ok(UserRecord::new(
            self.id.clone(),
            self.name.clone(),
            self.email.clone(),
            created_at,
        ))
    }
}

/// In-memory [`UserStore`] generating UUID v4 identifiers.
///
/// # Examples
/// ```
/// use user_registry::outbound::memory::InMemoryUserStore;
///
/// let store = InMemoryUserStore::new();
/// assert!(store.is_empty());
/// ```
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    documents: RwLock<Vec<StoredDocument>>,
}

impl InMemoryUserStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a document with an explicit id and raw `createdAt`, as an import
    /// from another store would. Replaces any document with the same id.
    pub fn import_document(
        &self,
        id: UserId,
        name: impl Into<String>,
        email: impl Into<String>,
        created_at: StoredTimestamp,
    ) {
        let document = StoredDocument {
            id,
            name: name.into(),
            email: email.into(),
            created_at,
        };
        let mut documents = self.write();
        documents.retain(|existing| existing.id != document.id);
        documents.push(document);
    }

    /// Number of stored documents.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Whether the store holds no documents.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // A poisoned lock only means another request panicked mid-operation;
    // every mutation is a single push/retain/assign, so the data is intact.
    fn read(&self) -> RwLockReadGuard<'_, Vec<StoredDocument>> {
        self.documents
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<StoredDocument>> {
        self.documents
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn insert(&self, document: NewUserDocument) -> Result<UserId, UserStoreError> {
        let NewUserDocument {
            name,
            email,
            created_at,
        } = document;
        let id = UserId::random();
        self.write().push(StoredDocument {
            id: id.clone(),
            name,
            email,
            created_at: StoredTimestamp::Native(created_at),
        });
        debug!(user_id = %id, "document inserted");
        Ok(id)
    }

    async fn get_by_id(&self, id: &UserId) -> Result<Option<UserRecord>, UserStoreError> {
        self.read()
            .iter()
            .find(|document| &document.id == id)
            .map(StoredDocument::to_record)
            .transpose()
    }

    async fn query_equals(
        &self,
        field: UserField,
        value: &str,
    ) -> Result<Vec<UserRecord>, UserStoreError> {
        self.read()
            .iter()
            .filter(|document| document.field(field) == value)
            .map(StoredDocument::to_record)
            .collect()
    }

    async fn update_fields(&self, id: &UserId, patch: UserPatch) -> Result<(), UserStoreError> {
        let mut documents = self.write();
        let document = documents
            .iter_mut()
            .find(|document| &document.id == id)
            .ok_or_else(|| UserStoreError::missing_document(id.as_ref()))?;
        if let Some(email) = patch.email {
            document.email = email;
        }
        Ok(())
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserStoreError> {
        self.write().retain(|document| &document.id != id);
        Ok(())
    }
}
