//! HTTP inbound adapter exposing the registry REST endpoints.

pub mod error;
pub mod health;
pub mod schemas;
pub mod state;
pub mod users;

use actix_web::{Scope, web};

pub use error::ApiResult;

/// The `/api/v1` scope with every user endpoint registered and body/query
/// decode failures routed through the error envelope.
///
/// Callers attach an [`state::HttpState`] as app data.
pub fn api_scope() -> Scope {
    web::scope("/api/v1")
        .app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(error::query_error_handler))
        .service(users::register_user)
        .service(users::find_users)
        .service(users::update_email)
        .service(users::delete_user)
}
