//! PostgreSQL-backed `UserStore` using Diesel.
//!
//! Identifiers are UUIDs generated by the `users.id` column default. Text
//! that does not parse as a UUID cannot name a stored row, so lookups and
//! deletes treat it as absent and updates report the document missing.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{UserField, UserPatch, UserStore, UserStoreError};
use crate::domain::{NewUserDocument, StoredTimestamp, UserId, UserRecord};

use super::models::{NewUserRow, UserChangeset, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel implementation of [`UserStore`].
#[derive(Clone)]
pub struct DieselUserStore {
    pool: DbPool,
}

impl DieselUserStore {
    /// Create a store over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserStoreError {
    UserStoreError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error) -> UserStoreError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => UserStoreError::query("record not found"),
        DieselError::QueryBuilderError(_) => UserStoreError::query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            UserStoreError::connection("database connection error")
        }
        _ => UserStoreError::query("database error"),
    }
}

fn parse_row_id(id: &UserId) -> Option<Uuid> {
    Uuid::parse_str(id.as_ref()).ok()
}

fn row_to_record(row: UserRow) -> Result<UserRecord, UserStoreError> {
    let raw_id = row.id.to_string();
    let id = UserId::new(raw_id.as_str())
        .map_err(|err| UserStoreError::corrupt_document(raw_id.as_str(), err.to_string()))?;
    let created_at = StoredTimestamp::Native(row.created_at)
        .normalize()
        .map_err(|err| UserStoreError::corrupt_document(raw_id, err.to_string()))?;
    Ok(UserRecord::new(id, row.name, row.email, created_at))
}

#[async_trait]
impl UserStore for DieselUserStore {
    async fn insert(&self, document: NewUserDocument) -> Result<UserId, UserStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewUserRow {
            name: &document.name,
            email: &document.email,
            created_at: document.created_at,
        };
        let id: Uuid = diesel::insert_into(users::table)
            .values(&row)
            .returning(users::id)
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        UserId::new(id.to_string())
            .map_err(|err| UserStoreError::corrupt_document(id.to_string(), err.to_string()))
    }

    async fn get_by_id(&self, id: &UserId) -> Result<Option<UserRecord>, UserStoreError> {
        let Some(row_id) = parse_row_id(id) else {
            return Ok(None);
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::id.eq(row_id))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_record).transpose()
    }

    async fn query_equals(
        &self,
        field: UserField,
        value: &str,
    ) -> Result<Vec<UserRecord>, UserStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let query = users::table
            .select(UserRow::as_select())
            .order((users::created_at.asc(), users::id.asc()))
            .into_boxed();
        let query = match field {
            UserField::Name => query.filter(users::name.eq(value)),
            UserField::Email => query.filter(users::email.eq(value)),
        };
        let rows: Vec<UserRow> = query.load(&mut conn).await.map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_record).collect()
    }

    async fn update_fields(&self, id: &UserId, patch: UserPatch) -> Result<(), UserStoreError> {
        let row_id = parse_row_id(id).ok_or_else(|| UserStoreError::missing_document(id.as_ref()))?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // Diesel rejects an empty changeset, so an empty patch only checks
        // that the row exists.
        let found = if patch.is_empty() {
            let count: i64 = users::table
                .filter(users::id.eq(row_id))
                .count()
                .get_result(&mut conn)
                .await
                .map_err(map_diesel_error)?;
            count > 0
        } else {
            let changeset = UserChangeset {
                email: patch.email.as_deref(),
            };
            let updated = diesel::update(users::table.filter(users::id.eq(row_id)))
                .set(&changeset)
                .execute(&mut conn)
                .await
                .map_err(map_diesel_error)?;
            updated > 0
        };

        if !found {
            return Err(UserStoreError::missing_document(id.as_ref()));
        }
        Ok(())
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserStoreError> {
        let Some(row_id) = parse_row_id(id) else {
            return Ok(());
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(users::table.filter(users::id.eq(row_id)))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }
}
