//! Router behaviour that does not need a live database
//!
//! Validation runs before any connection is opened, so these requests are
//! answered even though the configured database is unreachable.

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{app, send, send_raw, unreachable_database};

#[tokio::test]
async fn health_does_not_touch_database() {
    let app = app(unreachable_database());
    let (status, body) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "sportbook_test");
}

#[tokio::test]
async fn create_user_requires_every_field() {
    let app = app(unreachable_database());

    let (status, body) = send(&app, "POST", "/users", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
    assert_eq!(body["message"], "missing required field 'username'");

    let (status, body) = send(
        &app,
        "POST",
        "/users",
        Some(json!({"username": "test", "email": "t@example.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "missing required field 'password'");
}

#[tokio::test]
async fn create_user_rejects_bad_email_and_role() {
    let app = app(unreachable_database());

    let (status, _) = send(
        &app,
        "POST",
        "/users",
        Some(json!({"username": "test", "email": "not-an-email", "password": "x"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        "POST",
        "/users",
        Some(json!({
            "username": "test",
            "email": "t@example.com",
            "password": "x",
            "role": "superuser"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "invalid role value: 'superuser'");
}

#[tokio::test]
async fn overlong_user_fields_are_rejected() {
    let app = app(unreachable_database());

    let (status, body) = send(
        &app,
        "POST",
        "/users",
        Some(json!({"username": "u".repeat(51), "email": "t@example.com", "password": "x"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
    assert_eq!(body["message"], "username exceeds maximum length of 50");

    let (status, body) = send(
        &app,
        "POST",
        "/users",
        Some(json!({"username": "test", "email": "t@example.com", "password": "p".repeat(101)})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "password exceeds maximum length of 100");

    let (status, body) = send(
        &app,
        "PATCH",
        "/users/1",
        Some(json!({"username": "u".repeat(60)})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "username exceeds maximum length of 50");
}

#[tokio::test]
async fn empty_patch_is_rejected() {
    let app = app(unreachable_database());

    let (status, body) = send(&app, "PATCH", "/users/1", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "no recognized fields to update");

    let (status, _) = send(&app, "PATCH", "/facilities/1", Some(json!({"unknown": 1}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn facility_needs_description() {
    let app = app(unreachable_database());
    let (status, body) = send(&app, "POST", "/facilities", Some(json!({"name": "Kurt 1"}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "missing required field 'description'");
}

#[tokio::test]
async fn reservation_times_are_checked() {
    let app = app(unreachable_database());

    let (status, _) = send(
        &app,
        "POST",
        "/reservations",
        Some(json!({
            "user_id": 1,
            "facility_id": 1,
            "date": "2025-07-01",
            "start_time": "12:00:00",
            "end_time": "11:00:00"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "POST",
        "/reservations",
        Some(json!({
            "user_id": 1,
            "facility_id": 1,
            "date": "01.07.2025",
            "start_time": "11:00",
            "end_time": "12:00"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, "PATCH", "/reservations/1", Some(json!({"status": "maybe"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "invalid status value: 'maybe'");
}

#[tokio::test]
async fn non_integer_id_is_bad_request() {
    let app = app(unreachable_database());

    for uri in ["/users/abc", "/facilities/1.5", "/reservations/x", "/reservation/x"] {
        let (status, body) = send(&app, "GET", uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["message"], "id: must be an integer");
    }
}

#[tokio::test]
async fn out_of_range_id_is_not_found() {
    let app = app(unreachable_database());

    let (status, body) = send(&app, "GET", "/users/99999999999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "user '99999999999' not found");

    let (status, body) = send(&app, "GET", "/reservation/-3000000000", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "reservation '-3000000000' not found");

    let (status, _) = send(
        &app,
        "PATCH",
        "/facilities/2147483648",
        Some(json!({"available": false})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let app = app(unreachable_database());
    let (status, body) = send_raw(&app, "POST", "/users", "{not json").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");
}

#[tokio::test]
async fn bad_filter_is_rejected_before_connecting() {
    let app = app(unreachable_database());

    let (status, _) = send(&app, "GET", "/users?role=superuser", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "GET", "/reservations?date=tomorrow", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unreachable_database_is_503() {
    let app = app(unreachable_database());

    for uri in ["/users", "/facilities/1", "/reservations", "/reservation"] {
        let (status, body) = send(&app, "GET", uri, None).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE, "{uri}");
        assert_eq!(body["error"], "unavailable");
    }
}

#[tokio::test]
async fn singular_alias_is_read_only() {
    let app = app(unreachable_database());
    let (status, _) = send(&app, "DELETE", "/reservation/1", None).await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}
