//! OpenAPI document for the registry API.
//!
//! Registers the user endpoints, the health probes and the adapter-layer
//! schema mirrors from [`crate::inbound::http::schemas`]. Swagger UI serves
//! it at `/docs` in debug builds.

use utoipa::OpenApi;

use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema, UserRecordSchema};
use crate::inbound::http::users::{
    ConfirmationBody, DeleteRequestBody, RegisterRequestBody, RegisterResponseBody,
    UpdateEmailRequestBody, UsersResponseBody,
};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User registry API",
        description = "Register, look up, update and delete user records."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::register_user,
        crate::inbound::http::users::find_users,
        crate::inbound::http::users::update_email,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        UserRecordSchema,
        RegisterRequestBody,
        RegisterResponseBody,
        UsersResponseBody,
        UpdateEmailRequestBody,
        DeleteRequestBody,
        ConfirmationBody,
    )),
    tags(
        (name = "users", description = "User registry operations"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
