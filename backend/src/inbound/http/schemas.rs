//! OpenAPI schemas for domain types.
//!
//! The domain does not derive `ToSchema`; these mirrors live in the adapter
//! layer and are registered under the domain type names.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request failed validation or could not be decoded.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The deletion policy refused the operation.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The user does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The user store could not be reached.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected failure; the message is redacted.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`], the envelope every failure
/// uses.
#[derive(ToSchema)]
#[schema(as = Error, rename_all = "camelCase")]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct ErrorSchema {
    /// Machine-readable error kind.
    #[schema(example = "invalid_request")]
    error: ErrorCodeSchema,
    /// Human-readable message.
    #[schema(example = "email must have the form name@domain.tld")]
    message: String,
    /// Identifier matching the `trace-id` response header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Field-level context, e.g. `{"field": "email", "code": "invalid_email_shape"}`.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::UserRecord`].
#[derive(ToSchema)]
#[schema(as = UserRecord, rename_all = "camelCase")]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct UserRecordSchema {
    /// Store-generated identifier.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: String,
    /// Name as registered.
    #[schema(example = "Alice")]
    name: String,
    /// Current email.
    #[schema(example = "a@b.com")]
    email: String,
    /// Creation instant (RFC 3339, UTC).
    #[schema(value_type = String, format = DateTime, example = "2026-03-01T09:00:00Z")]
    created_at: String,
}
