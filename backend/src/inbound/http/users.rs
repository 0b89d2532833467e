//! User registry handlers.
//!
//! ```text
//! POST /api/v1/users         {"name":"Alice","email":"a@b.com"}
//! GET  /api/v1/users?name=Alice
//! POST /api/v1/users/email   {"userId":"…","newEmail":"new@b.com"}
//! POST /api/v1/users/delete  {"userId":"…"}
//! ```
//!
//! Absent body fields decode as empty strings and flow into the ordinary
//! validation, so `{}` on register is rejected by the email check.

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{DeleteUserRequest, RegisterUserRequest, UpdateEmailRequest};
use crate::domain::{Error, UserId, UserIdValidationError, UserRecord};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, UserRecordSchema};
use crate::inbound::http::state::HttpState;

/// Body for `POST /api/v1/users`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterRequestBody {
    #[schema(example = "Alice")]
    pub name: String,
    #[schema(example = "a@b.com")]
    pub email: String,
}

/// Query for `GET /api/v1/users`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LookupParams {
    /// Exact name to match.
    pub name: Option<String>,
}

/// Body for `POST /api/v1/users/email`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateEmailRequestBody {
    pub user_id: String,
    #[schema(example = "new@b.com")]
    pub new_email: String,
}

/// Body for `POST /api/v1/users/delete`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct DeleteRequestBody {
    pub user_id: String,
}

/// Successful registration.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RegisterResponseBody {
    pub success: bool,
    pub id: String,
}

/// Matching users.
#[derive(Debug, Serialize, ToSchema)]
pub struct UsersResponseBody {
    #[schema(value_type = Vec<UserRecordSchema>)]
    pub users: Vec<UserRecord>,
}

/// Confirmation for update and delete.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ConfirmationBody {
    pub success: bool,
    pub message: String,
}

impl ConfirmationBody {
    fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

fn parse_user_id(raw: String) -> Result<UserId, Error> {
    UserId::new(raw).map_err(|err: UserIdValidationError| {
        Error::invalid_request(err.to_string())
            .with_details(json!({ "field": "userId", "code": "invalid_user_id" }))
    })
}

/// Register a user.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = RegisterRequestBody,
    responses(
        (status = 200, description = "User registered", body = RegisterResponseBody),
        (status = 400, description = "Hangul in name, malformed email or undecodable body", body = ErrorSchema),
        (status = 503, description = "User store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "registerUser"
)]
#[post("/users")]
pub async fn register_user(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequestBody>,
) -> ApiResult<web::Json<RegisterResponseBody>> {
    let RegisterRequestBody { name, email } = payload.into_inner();
    let response = state
        .command
        .register(RegisterUserRequest { name, email })
        .await?;
    Ok(web::Json(RegisterResponseBody {
        success: true,
        id: response.id.into(),
    }))
}

/// Find users whose name matches exactly.
#[utoipa::path(
    get,
    path = "/api/v1/users",
    params(LookupParams),
    responses(
        (status = 200, description = "Matching users in store order", body = UsersResponseBody),
        (status = 400, description = "Missing name", body = ErrorSchema),
        (status = 404, description = "No user has this name", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "findUsersByName"
)]
#[get("/users")]
pub async fn find_users(
    state: web::Data<HttpState>,
    params: web::Query<LookupParams>,
) -> ApiResult<web::Json<UsersResponseBody>> {
    let name = params.into_inner().name.unwrap_or_default();
    let users = state.query.find_by_name(&name).await?;
    Ok(web::Json(UsersResponseBody { users }))
}

/// Replace a user's email. The user's existence is not checked first.
#[utoipa::path(
    post,
    path = "/api/v1/users/email",
    request_body = UpdateEmailRequestBody,
    responses(
        (status = 200, description = "Email updated", body = ConfirmationBody),
        (status = 400, description = "Malformed email or user id", body = ErrorSchema),
        (status = 500, description = "Store failure, including an unknown user", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "updateUserEmail"
)]
#[post("/users/email")]
pub async fn update_email(
    state: web::Data<HttpState>,
    payload: web::Json<UpdateEmailRequestBody>,
) -> ApiResult<HttpResponse> {
    let UpdateEmailRequestBody { user_id, new_email } = payload.into_inner();
    let user_id = parse_user_id(user_id)?;
    state
        .command
        .update_email(UpdateEmailRequest { user_id, new_email })
        .await?;
    Ok(HttpResponse::Ok().json(ConfirmationBody::new("email updated")))
}

/// Delete a user once the minimum age has elapsed.
#[utoipa::path(
    post,
    path = "/api/v1/users/delete",
    request_body = DeleteRequestBody,
    responses(
        (status = 200, description = "User deleted", body = ConfirmationBody),
        (status = 400, description = "Malformed user id", body = ErrorSchema),
        (status = 403, description = "User registered too recently", body = ErrorSchema),
        (status = 404, description = "No such user", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[post("/users/delete")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    payload: web::Json<DeleteRequestBody>,
) -> ApiResult<HttpResponse> {
    let user_id = parse_user_id(payload.into_inner().user_id)?;
    state.command.delete(DeleteUserRequest { user_id }).await?;
    Ok(HttpResponse::Ok().json(ConfirmationBody::new("user deleted")))
}

#[cfg(test)]
mod tests;
