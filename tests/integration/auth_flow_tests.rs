// ==============================
// tests/integration/auth_flow_tests.rs
// ==============================
//! Register, log in and read the profile over HTTP
use crate::test_utils::{login, me, register, send, setup_test_app, TEST_SECRET};
use axum::http::{Method, StatusCode};
use backend_lib::auth::TokenService;
use chrono::{TimeDelta, Utc};
use std::time::Duration;

#[tokio::test]
async fn test_full_auth_flow() {
    let app = setup_test_app().await;

    // register
    let (status, body) = register(&app, "Ada", "ada@x.com", "secret1").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "User registered successfully");
    assert!(body.get("token").is_none());

    // register again with the same email
    let (status, body) = register(&app, "Ada", "ada@x.com", "secret1").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "USER_001");

    // login with the correct password
    let (status, body) = login(&app, "ada@x.com", "secret1").await;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().unwrap().to_string();
    assert!(body["expires_at"].is_string());

    // profile with that token
    let (status, body) = me(&app, Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Ada");
    assert_eq!(body["email"], "ada@x.com");
    assert!(!body["id"].as_str().unwrap().is_empty());
    assert!(body.get("password").is_none());
    assert!(body.get("password_hash").is_none());

    // login with the wrong password
    let (status, _) = login(&app, "ada@x.com", "wrong-password").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // garbage token
    let (status, _) = me(&app, Some("garbage")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // expired token for the same account
    let user_id = body["id"].as_str().unwrap().to_string();
    let tokens = TokenService::new(TEST_SECRET.as_bytes(), Duration::from_secs(3600)).unwrap();
    let expired = tokens
        .issue_at(&user_id, Utc::now() - TimeDelta::hours(2))
        .unwrap();
    let (status, _) = me(&app, Some(&expired.token)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_failures_look_identical() {
    let app = setup_test_app().await;
    register(&app, "Ada", "ada@x.com", "secret1").await;

    let unknown = login(&app, "nobody@x.com", "secret1").await;
    let wrong = login(&app, "ada@x.com", "not-the-password").await;

    assert_eq!(unknown.0, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown, wrong);
}

#[tokio::test]
async fn test_email_is_case_insensitive() {
    let app = setup_test_app().await;

    let (status, _) = register(&app, "Ada", "Ada@X.com", "secret1").await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = register(&app, "Ada", "ada@x.com", "secret1").await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = login(&app, "ADA@x.COM", "secret1").await;
    assert_eq!(status, StatusCode::OK);

    let (_, profile) = me(&app, body["token"].as_str()).await;
    assert_eq!(profile["email"], "ada@x.com");
}

#[tokio::test]
async fn test_validation_failures() {
    let app = setup_test_app().await;

    let (status, body) = register(&app, "", "ada@x.com", "secret1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VAL_001");

    let (status, _) = register(&app, "Ada", "not-an-email", "secret1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = register(&app, "Ada", "ada@x.com", "12345").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = register(&app, &"a".repeat(101), "ada@x.com", "secret1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = login(&app, "ada@x.com", "").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = setup_test_app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/register",
        Some(serde_json::json!({ "name": "Ada" })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VAL_001");
}

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let app = setup_test_app().await;

    let (status, body) = me(&app, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "AUTH_002");
}

#[tokio::test]
async fn test_token_for_missing_account_is_not_found() {
    let app = setup_test_app().await;
    let tokens = TokenService::new(TEST_SECRET.as_bytes(), Duration::from_secs(3600)).unwrap();
    let issued = tokens.issue("no-such-user").unwrap();

    let (status, body) = me(&app, Some(&issued.token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "USER_002");
}

#[tokio::test]
async fn test_token_signed_with_other_secret_is_rejected() {
    let app = setup_test_app().await;
    let (_, _) = register(&app, "Ada", "ada@x.com", "secret1").await;
    let (_, body) = login(&app, "ada@x.com", "secret1").await;
    let (_, profile) = me(&app, body["token"].as_str()).await;

    let forger = TokenService::new(b"some-other-secret", Duration::from_secs(3600)).unwrap();
    let forged = forger.issue(profile["id"].as_str().unwrap()).unwrap();

    let (status, _) = me(&app, Some(&forged.token)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
