// ============================
// crates/backend-lib/src/validation/mod.rs
// ============================
//! Request validation module.

use crate::config::PasswordPolicy;
use gatekeeper_common::{LoginRequest, RegisterRequest};
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

// Common validation constants
const MAX_NAME_LENGTH: usize = 100;
const MAX_EMAIL_LENGTH: usize = 254; // RFC 5321 SMTP limit

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .unwrap_or_else(|e| panic!("email pattern must compile: {e}"))
});

/// Possible validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid name: {0}")]
    InvalidName(String),

    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    #[error("Invalid password: {0}")]
    InvalidPassword(String),
}

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Canonical form of an email address: surrounding whitespace removed, lower-cased.
///
/// Every lookup and insert goes through this, so `Ada@X.com` and `ada@x.com` are one account.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Validate a display name, returning it trimmed
pub fn validate_name(name: &str) -> ValidationResult<&str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::InvalidName(
            "Name must not be empty".to_string(),
        ));
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::InvalidName(format!(
            "Name must be between 1 and {MAX_NAME_LENGTH} characters"
        )));
    }

    if name.chars().any(char::is_control) {
        return Err(ValidationError::InvalidName(
            "Name contains invalid characters".to_string(),
        ));
    }

    Ok(name)
}

/// Validate an email address
pub fn validate_email(email: &str) -> ValidationResult<&str> {
    if email.is_empty() {
        return Err(ValidationError::InvalidEmail(
            "Email address cannot be empty".to_string(),
        ));
    }

    if email.len() > MAX_EMAIL_LENGTH {
        return Err(ValidationError::InvalidEmail(format!(
            "Email address cannot exceed {MAX_EMAIL_LENGTH} characters"
        )));
    }

    if !EMAIL_REGEX.is_match(email) {
        return Err(ValidationError::InvalidEmail(
            "Invalid email address format".to_string(),
        ));
    }

    Ok(email)
}

/// Validate a new password against the configured policy
pub fn validate_password<'a>(password: &'a str, policy: &PasswordPolicy) -> ValidationResult<&'a str> {
    let length = password.chars().count();
    if length < policy.min_length {
        return Err(ValidationError::InvalidPassword(format!(
            "Password must be at least {} characters",
            policy.min_length
        )));
    }

    if length > policy.max_length {
        return Err(ValidationError::InvalidPassword(format!(
            "Password cannot exceed {} characters",
            policy.max_length
        )));
    }

    Ok(password)
}

/// A registration request that passed validation, with the email normalized
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidRegistration {
    pub name: String,
    pub email: String,
}

/// Validates a registration request
pub fn validate_registration(
    request: &RegisterRequest,
    policy: &PasswordPolicy,
) -> ValidationResult<ValidRegistration> {
    let name = validate_name(&request.name)?;
    let email = normalize_email(&request.email);
    validate_email(&email)?;
    validate_password(&request.password, policy)?;

    Ok(ValidRegistration {
        name: name.to_string(),
        email,
    })
}

/// Validates a login request, returning the normalized email.
///
/// Only the shape is checked here; the password policy applies to new passwords.
pub fn validate_login(request: &LoginRequest) -> ValidationResult<String> {
    let email = normalize_email(&request.email);
    validate_email(&email)?;

    if request.password.is_empty() {
        return Err(ValidationError::InvalidPassword(
            "Password is required".to_string(),
        ));
    }

    Ok(email)
}
