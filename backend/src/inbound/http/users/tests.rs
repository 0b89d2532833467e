//! Handler tests: port mocks for mapping, the in-memory store for flows.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use mockall::predicate::eq;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use super::*;
use crate::Trace;
use crate::domain::ports::{
    MockUserRegistryCommand, MockUserRegistryQuery, RegisterUserResponse, UserRegistryCommand,
    UserRegistryQuery,
};
use crate::domain::{DeletionPolicy, StoredTimestamp, TRACE_ID_HEADER, UserRegistryService};
use crate::inbound::http::api_scope;
use crate::outbound::memory::InMemoryUserStore;
use crate::test_support::{MutableClock, fixture_instant};

fn user_id(raw: &str) -> UserId {
    UserId::new(raw).expect("valid id")
}

async fn send(state: HttpState, request: actix_test::TestRequest) -> (StatusCode, Value, Option<String>) {
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .wrap(Trace)
            .service(api_scope()),
    )
    .await;
    let response = actix_test::call_service(&app, request.to_request()).await;
    let status = response.status();
    let trace_id = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let body = actix_test::read_body(response).await;
    let value = serde_json::from_slice(&body).expect("JSON body");
    (status, value, trace_id)
}

fn mocked(command: MockUserRegistryCommand, query: MockUserRegistryQuery) -> HttpState {
    HttpState::new(Arc::new(command), Arc::new(query))
}

fn post_json(uri: &str, body: Value) -> actix_test::TestRequest {
    actix_test::TestRequest::post().uri(uri).set_json(body)
}

#[rstest]
#[actix_web::test]
async fn register_returns_success_and_id() {
    let mut command = MockUserRegistryCommand::new();
    command
        .expect_register()
        .with(eq(RegisterUserRequest {
            name: "Alice".to_owned(),
            email: "a@b.com".to_owned(),
        }))
        .times(1)
        .return_once(|_| {
            Ok(RegisterUserResponse {
                id: UserId::new("k3").expect("valid id"),
            })
        });

    let (status, body, _) = send(
        mocked(command, MockUserRegistryQuery::new()),
        post_json("/api/v1/users", json!({"name": "Alice", "email": "a@b.com"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true, "id": "k3"}));
}

#[rstest]
#[actix_web::test]
async fn register_passes_absent_fields_as_empty_strings() {
    let mut command = MockUserRegistryCommand::new();
    command
        .expect_register()
        .withf(|request| request.name.is_empty() && request.email.is_empty())
        .times(1)
        .return_once(|_| Err(Error::invalid_request("email must have the form name@domain.tld")));

    let (status, body, _) = send(
        mocked(command, MockUserRegistryQuery::new()),
        post_json("/api/v1/users", json!({})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_request");
}

#[rstest]
#[actix_web::test]
async fn malformed_json_uses_error_envelope() {
    let mut command = MockUserRegistryCommand::new();
    command.expect_register().times(0);

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/users")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json");
    let (status, body, trace_id) = send(mocked(command, MockUserRegistryQuery::new()), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_request");
    assert_eq!(body["traceId"].as_str(), trace_id.as_deref());
}

#[rstest]
#[case(Error::not_found("no users named \"Bob\""), StatusCode::NOT_FOUND, "not_found")]
#[case(Error::invalid_request("name is required"), StatusCode::BAD_REQUEST, "invalid_request")]
#[case(Error::service_unavailable("down"), StatusCode::SERVICE_UNAVAILABLE, "service_unavailable")]
#[actix_web::test]
async fn lookup_maps_query_errors(
    #[case] error: Error,
    #[case] status: StatusCode,
    #[case] kind: &str,
) {
    let mut query = MockUserRegistryQuery::new();
    query
        .expect_find_by_name()
        .times(1)
        .return_once(move |_| Err(error));

    let (actual, body, _) = send(
        mocked(MockUserRegistryCommand::new(), query),
        actix_test::TestRequest::get().uri("/api/v1/users?name=Bob"),
    )
    .await;

    assert_eq!(actual, status);
    assert_eq!(body["error"], kind);
}

#[rstest]
#[actix_web::test]
async fn lookup_without_name_queries_with_empty_string() {
    let mut query = MockUserRegistryQuery::new();
    query
        .expect_find_by_name()
        .withf(|name| name.is_empty())
        .times(1)
        .return_once(|_| Err(Error::invalid_request("name is required")));

    let (status, _, _) = send(
        mocked(MockUserRegistryCommand::new(), query),
        actix_test::TestRequest::get().uri("/api/v1/users"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[rstest]
#[actix_web::test]
async fn lookup_lists_records_in_camel_case() {
    let mut query = MockUserRegistryQuery::new();
    query
        .expect_find_by_name()
        .withf(|name| name == "Alice")
        .times(1)
        .return_once(|_| {
            Ok(vec![UserRecord::new(
                UserId::new("k3").expect("valid id"),
                "Alice",
                "a@b.com",
                fixture_instant(),
            )])
        });

    let (status, body, _) = send(
        mocked(MockUserRegistryCommand::new(), query),
        actix_test::TestRequest::get().uri("/api/v1/users?name=Alice"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"users": [{
            "id": "k3",
            "name": "Alice",
            "email": "a@b.com",
            "createdAt": "2026-03-01T09:00:00Z",
        }]})
    );
}

#[rstest]
#[case("", "user id must not be empty")]
#[case(" k3", "user id must not contain surrounding whitespace")]
#[actix_web::test]
async fn mutations_reject_malformed_user_ids(#[case] raw_id: &str, #[case] message: &str) {
    for (uri, body) in [
        ("/api/v1/users/email", json!({"userId": raw_id, "newEmail": "a@b.com"})),
        ("/api/v1/users/delete", json!({"userId": raw_id})),
    ] {
        let mut command = MockUserRegistryCommand::new();
        command.expect_update_email().times(0);
        command.expect_delete().times(0);

        let (status, payload, _) =
            send(mocked(command, MockUserRegistryQuery::new()), post_json(uri, body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(payload["message"], message);
        assert_eq!(payload["details"]["field"], "userId");
    }
}

#[rstest]
#[actix_web::test]
async fn update_email_confirms() {
    let mut command = MockUserRegistryCommand::new();
    command
        .expect_update_email()
        .with(eq(UpdateEmailRequest {
            user_id: user_id("k3"),
            new_email: "new@b.com".to_owned(),
        }))
        .times(1)
        .return_once(|_| Ok(()));

    let (status, body, _) = send(
        mocked(command, MockUserRegistryQuery::new()),
        post_json(
            "/api/v1/users/email",
            json!({"userId": "k3", "newEmail": "new@b.com"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true, "message": "email updated"}));
}

#[rstest]
#[case(Error::forbidden("too recent"), StatusCode::FORBIDDEN)]
#[case(Error::not_found("user k3 not found"), StatusCode::NOT_FOUND)]
#[actix_web::test]
async fn delete_maps_command_errors(#[case] error: Error, #[case] status: StatusCode) {
    let mut command = MockUserRegistryCommand::new();
    command
        .expect_delete()
        .with(eq(DeleteUserRequest {
            user_id: user_id("k3"),
        }))
        .times(1)
        .return_once(move |_| Err(error));

    let (actual, _, _) = send(
        mocked(command, MockUserRegistryQuery::new()),
        post_json("/api/v1/users/delete", json!({"userId": "k3"})),
    )
    .await;
    assert_eq!(actual, status);
}

struct Registry {
    store: Arc<InMemoryUserStore>,
    clock: Arc<MutableClock>,
    state: HttpState,
}

#[fixture]
fn registry() -> Registry {
    let store = Arc::new(InMemoryUserStore::new());
    let clock = Arc::new(MutableClock::at_fixture_instant());
    let service = UserRegistryService::new(store.clone(), clock.clone(), DeletionPolicy::default());
    Registry {
        store,
        clock,
        state: HttpState::from_service(Arc::new(service)),
    }
}

async fn register(state: &HttpState, name: &str, email: &str) -> (StatusCode, Value) {
    let (status, body, _) = send(
        state.clone(),
        post_json("/api/v1/users", json!({"name": name, "email": email})),
    )
    .await;
    (status, body)
}

#[rstest]
#[actix_web::test]
async fn hangul_name_is_rejected_without_storing(registry: Registry) {
    let (status, body) = register(&registry.state, "철수", "a@b.com").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["code"], "disallowed_script");
    assert!(registry.store.is_empty());
}

#[rstest]
#[actix_web::test]
async fn delete_respects_minimum_age(registry: Registry) {
    let (_, body) = register(&registry.state, "Alice", "a@b.com").await;
    let id = body["id"].as_str().expect("id").to_owned();
    let delete = || post_json("/api/v1/users/delete", json!({"userId": id}));

    let (status, body, _) = send(registry.state.clone(), delete()).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "forbidden");

    registry.clock.advance_millis(60_001);
    let (status, _, _) = send(registry.state.clone(), delete()).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _, _) = send(
        registry.state.clone(),
        actix_test::TestRequest::get().uri("/api/v1/users?name=Alice"),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn update_email_on_unknown_user_is_redacted_500(registry: Registry) {
    let (status, body, trace_id) = send(
        registry.state.clone(),
        post_json(
            "/api/v1/users/email",
            json!({"userId": "ghost", "newEmail": "x@y.z"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "internal_error");
    assert_eq!(body["message"], "Internal server error");
    assert_eq!(body["traceId"].as_str(), trace_id.as_deref());
    assert!(registry.store.is_empty());
}

#[rstest]
#[case(StoredTimestamp::EpochMillis(fixture_instant().timestamp_millis()))]
#[case(StoredTimestamp::Rfc3339("2026-03-01T09:00:00.000Z".to_owned()))]
#[actix_web::test]
async fn imported_timestamps_gate_deletion_like_native_ones(
    registry: Registry,
    #[case] created_at: StoredTimestamp,
) {
    registry
        .store
        .import_document(user_id("legacy"), "Bob", "bob@b.com", created_at);
    let delete = || post_json("/api/v1/users/delete", json!({"userId": "legacy"}));

    registry.clock.advance_millis(59_999);
    let (status, _, _) = send(registry.state.clone(), delete()).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    registry.clock.advance_millis(1);
    let (status, _, _) = send(registry.state.clone(), delete()).await;
    assert_eq!(status, StatusCode::OK);
}

#[rstest]
fn http_state_from_service_shares_one_instance(registry: Registry) {
    let command: &dyn UserRegistryCommand = registry.state.command.as_ref();
    let query: &dyn UserRegistryQuery = registry.state.query.as_ref();
    assert!(std::ptr::addr_eq(command, query));
}
