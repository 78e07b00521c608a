use axum::{extract::State, Extension, Json};
use gatekeeper_common::UserProfile;

use crate::middleware::AuthenticatedUser;
use crate::{error::AppError, AppState};

/// `GET /api/user/me`, behind the access guard
pub async fn me(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<UserProfile>, AppError> {
    let profile = state.auth.current_user(&user.user_id).await?;
    Ok(Json(profile))
}
