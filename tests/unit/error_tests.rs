// =========================
// tests/unit/error_tests.rs
// =========================
//! Unit tests for the error module
use axum::http::StatusCode;
use axum::response::IntoResponse;
use backend_lib::auth::{AuthError, TokenError};
use backend_lib::error::AppError;
use backend_lib::validation::ValidationError;
use gatekeeper_common::ErrorResponse;

async fn render(error: AppError) -> (StatusCode, ErrorResponse) {
    let response = error.into_response();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_auth_errors_map_to_boundary_statuses() {
    let cases = [
        (
            AuthError::Validation(ValidationError::InvalidName("empty".to_string())),
            StatusCode::BAD_REQUEST,
            "VAL_001",
        ),
        (AuthError::DuplicateEmail, StatusCode::CONFLICT, "USER_001"),
        (AuthError::InvalidCredentials, StatusCode::UNAUTHORIZED, "AUTH_001"),
        (
            AuthError::Unauthorized(TokenError::Expired),
            StatusCode::UNAUTHORIZED,
            "AUTH_002",
        ),
        (AuthError::AccountMissing, StatusCode::NOT_FOUND, "USER_002"),
        (
            AuthError::Hashing("rng failure".to_string()),
            StatusCode::INTERNAL_SERVER_ERROR,
            "INT_001",
        ),
        (
            AuthError::Storage("disk full".to_string()),
            StatusCode::INTERNAL_SERVER_ERROR,
            "INT_001",
        ),
    ];

    for (error, status, code) in cases {
        let (actual_status, body) = render(AppError::from(error)).await;
        assert_eq!(actual_status, status);
        assert_eq!(body.error.code, code);
    }
}

#[test]
fn test_sanitized_messages_hide_details() {
    let internal = AppError::from(AuthError::Storage("/var/lib/gatekeeper: permission denied".to_string()));
    assert_eq!(internal.sanitized_message(), "An internal server error occurred");

    let unauthorized = AppError::from(AuthError::Unauthorized(TokenError::InvalidSignature));
    assert_eq!(unauthorized.sanitized_message(), "Unauthorized");
}
