//! Failure taxonomy of the auth core.
use thiserror::Error;

use super::TokenError;
use crate::directory::DirectoryError;
use crate::validation::ValidationError;

/// Every way a gateway operation can fail
#[derive(Error, Debug)]
pub enum AuthError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Email already registered")]
    DuplicateEmail,

    /// Unknown email and wrong password are deliberately the same value
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Unauthorized: {0}")]
    Unauthorized(#[from] TokenError),

    /// The token was valid but its account no longer exists
    #[error("Account not found")]
    AccountMissing,

    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

impl From<DirectoryError> for AuthError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::DuplicateEmail => Self::DuplicateEmail,
            DirectoryError::DuplicateId(id) => Self::Internal(format!("user id collision: {id}")),
            DirectoryError::Storage(e) => Self::Storage(e.to_string()),
        }
    }
}

/// Result alias for the auth core
pub type AuthResult<T> = Result<T, AuthError>;
