//! Shared fixtures for the integration tests: an in-memory SQLite store
//! migrated by the real migrator, the full API router, and small request
//! helpers.

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Request, StatusCode, header},
};
use capmatch_backend::{AppState, api_router};
use http_body_util::BodyExt;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, Set};
use serde_json::Value;
use tower::ServiceExt;

pub const TEST_JWT_SECRET: &str = "test-secret";

pub struct TestApp {
    pub app: Router,
    pub db: DatabaseConnection,
}

/// Set up an isolated in-memory test database and run migrations.
///
/// A single pooled connection keeps the in-memory database alive for the
/// test's lifetime.
pub async fn setup_test_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:".to_owned());
    options.max_connections(1).min_connections(1);

    let db = Database::connect(options)
        .await
        .expect("Failed to open in-memory test database");
    Migrator::up(&db, None).await.expect("Failed to run migrations");
    db
}

/// Build the full router over a fresh database and upload directory.
pub async fn spawn_app() -> TestApp {
    let db = setup_test_db().await;
    let upload_dir = std::env::temp_dir().join(format!("capmatch-test-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&upload_dir).expect("Failed to create test upload dir");

    let state = AppState {
        db: db.clone(),
        jwt_secret: TEST_JWT_SECRET.to_string(),
        upload_dir,
    };
    TestApp {
        app: api_router(state),
        db,
    }
}

/// Send a request with an optional bearer token and JSON body; parse the
/// response body as JSON (null when empty or non-JSON).
pub async fn send_json(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

/// Send a request and return status, headers and the raw body.
#[allow(dead_code)]
pub async fn send_raw(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
) -> (StatusCode, HeaderMap, Vec<u8>) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = builder.body(Body::empty()).unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, headers, bytes.to_vec())
}

/// Register an account through the API and return its bearer token.
#[allow(dead_code)]
pub async fn register(app: &Router, email: &str, role: &str) -> String {
    let mut body = serde_json::json!({
        "email": email,
        "password": "password12345",
        "role": role,
    });
    if role == "developer" {
        body["company_name"] = "Acme Development".into();
    }
    if role == "investor" {
        body["aum_band"] = "50-100".into();
    }
    let (status, value) = send_json(app, "POST", "/api/auth/register", None, Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "registration failed: {}", value);
    value["token"].as_str().unwrap().to_string()
}

/// Insert an admin account directly into the store and mint its token.
/// Admins are provisioned out of band, never via self-registration.
#[allow(dead_code)]
pub async fn admin_token(db: &DatabaseConnection) -> String {
    let account = capmatch_backend::entities::users::ActiveModel {
        email: Set("admin@capmatch.test".to_string()),
        password_hash: Set(
            capmatch_backend::services::password::hash_password("adminpassword").unwrap(),
        ),
        role: Set("admin".to_string()),
        is_verified: Set(true),
        preferences: Set(serde_json::json!({})),
        created_at: Set(chrono::Utc::now().into()),
        ..Default::default()
    };
    let inserted = account.insert(db).await.unwrap();
    capmatch_backend::session::create_token(TEST_JWT_SECRET, inserted.id).unwrap()
}

/// A minimal valid project creation payload.
#[allow(dead_code)]
pub fn project_payload(title: &str, irr: f64, location: &str) -> Value {
    serde_json::json!({
        "title": title,
        "description": format!("{} synopsis", title),
        "project_type": "commercial",
        "budget": 120.0,
        "funding": 45.0,
        "duration": 24,
        "irr": irr,
        "location": location,
        "risk_level": 6,
        "secured": "mezz",
        "sponsor_equity": 10.0,
    })
}

/// Build a multipart/form-data body with a single file field; returns the
/// content-type header value and the body bytes.
#[allow(dead_code)]
pub fn multipart_body(filename: &str, content: &[u8]) -> (String, Vec<u8>) {
    let boundary = "capmatchtestboundary";
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{}\r\nContent-Disposition: form-data; name=\"attachment\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
            boundary, filename
        )
        .as_bytes(),
    );
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());
    (
        format!("multipart/form-data; boundary={}", boundary),
        body,
    )
}
