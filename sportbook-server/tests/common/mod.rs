//! Shared helpers for router tests
#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tokio::sync::{Mutex, MutexGuard};
use tower::ServiceExt;

use sportbook_server::db::schema;
use sportbook_server::db::UserRepo;
use sportbook_server::models::{Email, NewUser, Role};
use sportbook_server::{build_router, Database, DbConfig, Mode};

/// Database tests share one schema, so they run one at a time.
static DB_LOCK: Mutex<()> = Mutex::const_new(());

/// Provider pointing at a closed port; every connection attempt fails.
pub fn unreachable_database() -> Database {
    let config = DbConfig {
        host: "127.0.0.1".into(),
        port: 1,
        database: "sportbook_test".into(),
        ..DbConfig::default()
    };
    Database::new(&config, Mode::Testing).expect("valid test config")
}

/// Provider for the real test database, configured via `SPORTBOOK_TEST_DB_*`.
pub fn test_database() -> Database {
    let mut config = DbConfig {
        database: "sportbook_test".into(),
        ..DbConfig::default()
    };
    config
        .apply_env("SPORTBOOK_TEST_DB")
        .expect("invalid SPORTBOOK_TEST_DB_* value");
    Database::new(&config, Mode::Testing).expect("not a test database")
}

pub fn sample_users() -> Vec<NewUser> {
    vec![
        NewUser {
            username: "jirka".into(),
            email: Email::new("jirka@email.cz").unwrap(),
            password: "pw123".into(),
            role: Role::User,
        },
        NewUser {
            username: "katka".into(),
            email: Email::new("katka@email.cz").unwrap(),
            password: "pw456".into(),
            role: Role::Admin,
        },
    ]
}

/// Lock the test database, recreate an empty schema and seed the sample users.
pub async fn fresh_database() -> (MutexGuard<'static, ()>, Database) {
    let guard = DB_LOCK.lock().await;
    let db = test_database();

    db.with_connection(|conn| {
        Box::pin(async move {
            schema::apply(&mut *conn).await?;
            schema::truncate_all(&mut *conn).await?;
            UserRepo::new(conn).add_many(&sample_users()).await?;
            Ok(())
        })
    })
    .await
    .expect("failed to reset test database");

    (guard, db)
}

pub fn app(db: Database) -> Router {
    build_router(db, false)
}

/// Send one request and decode the JSON body (`Null` when empty).
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

/// Send a raw body with a JSON content type.
pub async fn send_raw(app: &Router, method: &str, uri: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_owned()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}
