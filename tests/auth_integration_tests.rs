mod common;

use axum::http::StatusCode;
use serde_json::json;

use crate::common::{register, send_json, spawn_app};

#[tokio::test]
async fn test_register_then_login() {
    let app = spawn_app().await;

    let token = register(&app.app, "dev@example.com", "developer").await;
    assert!(!token.is_empty());

    let (status, body) = send_json(
        &app.app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": "dev@example.com", "password": "password12345" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["email"], "dev@example.com");
    assert_eq!(body["user"]["role"], "developer");
    assert!(body["token"].as_str().is_some());
    // The password hash never appears in any response
    assert!(body["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_duplicate_email_is_case_insensitive_conflict() {
    let app = spawn_app().await;

    register(&app.app, "Dev@Example.com", "developer").await;

    let (status, body) = send_json(
        &app.app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "email": "dev@EXAMPLE.COM",
            "password": "password12345",
            "role": "developer",
            "company_name": "Other Co",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "DUPLICATE_EMAIL");
}

#[tokio::test]
async fn test_register_developer_requires_company_name() {
    let app = spawn_app().await;

    let (status, body) = send_json(
        &app.app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "email": "dev@example.com",
            "password": "password12345",
            "role": "developer",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION");
}

#[tokio::test]
async fn test_register_investor_requires_aum_band() {
    let app = spawn_app().await;

    let (status, body) = send_json(
        &app.app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "email": "inv@example.com",
            "password": "password12345",
            "role": "investor",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION");
}

#[tokio::test]
async fn test_register_rejects_admin_role() {
    let app = spawn_app().await;

    let (status, _) = send_json(
        &app.app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "email": "sneaky@example.com",
            "password": "password12345",
            "role": "admin",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_wrong_password_is_unauthorized() {
    let app = spawn_app().await;
    register(&app.app, "dev2@example.com", "developer").await;

    let (status, body) = send_json(
        &app.app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": "dev2@example.com", "password": "wrong-password" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "INVALID_CREDENTIALS");

    // Unknown email looks identical to a wrong password
    let (status, body) = send_json(
        &app.app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": "nobody@example.com", "password": "wrong-password" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn test_login_rate_limited_after_repeated_attempts() {
    let app = spawn_app().await;
    register(&app.app, "limited@example.com", "developer").await;

    let mut last_status = StatusCode::OK;
    for _ in 0..11 {
        let (status, _) = send_json(
            &app.app,
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": "limited@example.com", "password": "wrong-password" })),
        )
        .await;
        last_status = status;
    }
    assert_eq!(last_status, StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn test_me_requires_token() {
    let app = spawn_app().await;

    let (status, _) = send_json(&app.app, "GET", "/api/auth/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let token = register(&app.app, "dev3@example.com", "developer").await;
    let (status, body) = send_json(&app.app, "GET", "/api/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "dev3@example.com");
}

#[tokio::test]
async fn test_profile_partial_update() {
    let app = spawn_app().await;
    let token = register(&app.app, "inv2@example.com", "investor").await;

    let (status, body) = send_json(
        &app.app,
        "PUT",
        "/api/profile",
        Some(&token),
        Some(json!({ "first_name": "Jo", "phone": "+44 7700 900000" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["first_name"], "Jo");
    // Fields absent from the payload are untouched
    assert_eq!(body["aum_band"], "50-100");
}

#[tokio::test]
async fn test_preferences_default_to_empty_document() {
    let app = spawn_app().await;
    let token = register(&app.app, "inv3@example.com", "investor").await;

    let (status, body) = send_json(
        &app.app,
        "GET",
        "/api/profile/preferences",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({}));
}

#[tokio::test]
async fn test_preferences_round_trip_preserves_unknown_keys() {
    let app = spawn_app().await;
    let token = register(&app.app, "inv4@example.com", "investor").await;

    let (status, _) = send_json(
        &app.app,
        "PUT",
        "/api/profile/preferences",
        Some(&token),
        Some(json!({ "target_min_irr": 6.0, "legacy_flag": "keep-me" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // A partial update touching one field leaves the rest intact
    let (status, _) = send_json(
        &app.app,
        "PUT",
        "/api/profile/preferences",
        Some(&token),
        Some(json!({ "target_min_irr": 8.5 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send_json(
        &app.app,
        "GET",
        "/api/profile/preferences",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["target_min_irr"], json!(8.5));
    assert_eq!(body["legacy_flag"], json!("keep-me"));
}
