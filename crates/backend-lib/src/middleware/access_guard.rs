//! Access guard for protected routes.
//!
//! Rejects the request with `401` before the handler runs unless it carries a valid
//! bearer token; otherwise the token's user id is attached to the request extensions.
use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use gatekeeper_common::UserId;

use crate::auth::TokenError;
use crate::{error::AppError, AppState};

/// Identity attached to requests that passed the guard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Bearer-token guard, installed with `axum::middleware::from_fn_with_state`
pub async fn require_bearer(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let header = match request.headers().get(AUTHORIZATION) {
        Some(value) => Some(
            value
                .to_str()
                .map_err(|_| AppError::Unauthorized(TokenError::Malformed))?,
        ),
        None => None,
    };
    let user_id = state.auth.authorize(header)?;

    request.extensions_mut().insert(AuthenticatedUser { user_id });
    Ok(next.run(request).await)
}
