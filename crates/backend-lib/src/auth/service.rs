use async_trait::async_trait;
use gatekeeper_common::{LoginRequest, RegisterRequest, UserId, UserProfile};

use super::{AuthResult, IssuedToken};

/// Registration, login and token-gated access
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create an account. No token is issued; the caller logs in afterwards.
    async fn register(&self, request: RegisterRequest) -> AuthResult<UserProfile>;

    /// Exchange an email and password for a bearer token
    async fn login(&self, request: LoginRequest) -> AuthResult<IssuedToken>;

    /// Resolve an `Authorization` header value to the user id it carries
    fn authorize(&self, authorization: Option<&str>) -> AuthResult<UserId>;

    /// Profile of an authenticated user
    async fn current_user(&self, user_id: &str) -> AuthResult<UserProfile>;
}
