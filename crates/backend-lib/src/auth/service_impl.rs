use std::sync::Arc;

use ::metrics::counter;
use async_trait::async_trait;
use gatekeeper_common::{LoginRequest, RegisterRequest, UserId, UserProfile};
use uuid::Uuid;
use zeroize::Zeroizing;

use super::{bearer_token, AuthError, AuthResult, AuthService, CredentialHasher, IssuedToken, TokenService};
use crate::config::{AuthSettings, PasswordPolicy};
use crate::directory::{User, UserDirectory};
use crate::metrics::{LOGIN_FAILED, LOGIN_SUCCEEDED, REGISTER_REJECTED, REGISTER_SUCCEEDED, TOKEN_REJECTED};
use crate::storage::Storage;
use crate::validation::{validate_login, validate_registration};

/// Gateway over a [`UserDirectory`], a [`CredentialHasher`] and a [`TokenService`]
pub struct DefaultAuth<S> {
    directory: Arc<UserDirectory<S>>,
    hasher: CredentialHasher,
    tokens: TokenService,
    password_policy: PasswordPolicy,
    /// Checked against on unknown-email logins so both failure paths pay for scrypt
    dummy_digest: String,
}

const DUMMY_PASSWORD: &str = "gatekeeper-dummy-password";

impl<S: Storage> DefaultAuth<S> {
    pub fn new(
        directory: Arc<UserDirectory<S>>,
        hasher: CredentialHasher,
        tokens: TokenService,
        password_policy: PasswordPolicy,
    ) -> AuthResult<Self> {
        let dummy_digest = hasher.hash(DUMMY_PASSWORD)?;
        Ok(Self {
            directory,
            hasher,
            tokens,
            password_policy,
            dummy_digest,
        })
    }

    /// Build the hasher and token service from the `[auth]` settings
    pub fn from_settings(directory: Arc<UserDirectory<S>>, settings: &AuthSettings) -> AuthResult<Self> {
        let hasher = CredentialHasher::from_settings(&settings.scrypt)?;
        let ttl = std::time::Duration::from_secs(settings.token_ttl_secs);
        let tokens = TokenService::new(settings.jwt_secret.as_bytes(), ttl)
            .map_err(|e| AuthError::internal(e.to_string()))?;
        Self::new(directory, hasher, tokens, settings.password.clone())
    }

    pub fn directory(&self) -> &Arc<UserDirectory<S>> {
        &self.directory
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    // scrypt is CPU-bound; keep it off the async workers
    async fn hash(&self, password: Zeroizing<String>) -> AuthResult<String> {
        let hasher = self.hasher;
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AuthError::internal(format!("hashing task failed: {e}")))?
    }

    async fn verify(&self, password: Zeroizing<String>, digest: String) -> AuthResult<bool> {
        let hasher = self.hasher;
        tokio::task::spawn_blocking(move || hasher.verify(&password, &digest))
            .await
            .map_err(|e| AuthError::internal(format!("verification task failed: {e}")))
    }
}

fn login_failed() -> AuthError {
    counter!(LOGIN_FAILED).increment(1);
    tracing::warn!("login rejected: invalid credentials");
    AuthError::InvalidCredentials
}

#[async_trait]
impl<S: Storage + 'static> AuthService for DefaultAuth<S> {
    async fn register(&self, request: RegisterRequest) -> AuthResult<UserProfile> {
        let valid = validate_registration(&request, &self.password_policy).inspect_err(|e| {
            counter!(REGISTER_REJECTED).increment(1);
            tracing::debug!(error = %e, "registration rejected");
        })?;

        let password_hash = self.hash(Zeroizing::new(request.password)).await?;
        let user = User {
            id: Uuid::new_v4().to_string(),
            name: valid.name,
            email: valid.email,
            password_hash,
        };
        let profile = user.profile();

        self.directory.insert(user).await.map_err(|e| {
            counter!(REGISTER_REJECTED).increment(1);
            AuthError::from(e)
        })?;

        counter!(REGISTER_SUCCEEDED).increment(1);
        tracing::info!(user_id = %profile.id, "user registered");
        Ok(profile)
    }

    async fn login(&self, request: LoginRequest) -> AuthResult<IssuedToken> {
        let email = validate_login(&request)?;
        let password = Zeroizing::new(request.password);

        // unknown email and wrong password must be indistinguishable
        let Some(user) = self.directory.find_by_email(&email).await else {
            tracing::debug!(email = %email, "login for unknown email");
            self.verify(password, self.dummy_digest.clone()).await?;
            return Err(login_failed());
        };
        if !self.verify(password, user.password_hash.clone()).await? {
            tracing::debug!(user_id = %user.id, "login with wrong password");
            return Err(login_failed());
        }

        let issued = self
            .tokens
            .issue(&user.id)
            .map_err(|e| AuthError::internal(format!("token signing failed: {e}")))?;

        counter!(LOGIN_SUCCEEDED).increment(1);
        tracing::info!(user_id = %user.id, "login succeeded");
        Ok(issued)
    }

    fn authorize(&self, authorization: Option<&str>) -> AuthResult<UserId> {
        bearer_token(authorization)
            .and_then(|token| self.tokens.validate(token))
            .map_err(|reason| {
                counter!(TOKEN_REJECTED).increment(1);
                tracing::debug!(%reason, "bearer token rejected");
                AuthError::Unauthorized(reason)
            })
    }

    async fn current_user(&self, user_id: &str) -> AuthResult<UserProfile> {
        match self.directory.find_by_id(user_id).await {
            Some(user) => Ok(user.profile()),
            None => {
                tracing::warn!(user_id, "valid token for a missing account");
                Err(AuthError::AccountMissing)
            },
        }
    }
}
