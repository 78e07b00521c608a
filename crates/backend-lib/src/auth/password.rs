// ============================
// crates/backend-lib/src/auth/password.rs
// ============================
//! Password hashing and verification.
//!
//! Digests are scrypt PHC strings (`$scrypt$ln=..,r=..,p=..$<salt>$<hash>`), so the salt
//! and cost parameters travel with the digest and verification needs nothing else.
use scrypt::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Params, Scrypt,
};

use super::AuthError;
use crate::config::ScryptSettings;

/// Salted, deliberately slow one-way hasher for credentials
#[derive(Debug, Clone, Copy)]
pub struct CredentialHasher {
    params: Params,
}

impl CredentialHasher {
    /// Create a hasher with explicit scrypt cost parameters
    pub fn new(log_n: u8, r: u32, p: u32) -> Result<Self, AuthError> {
        let params = Params::new(log_n, r, p, Params::RECOMMENDED_LEN)
            .map_err(|e| AuthError::Hashing(format!("invalid scrypt parameters: {e}")))?;
        Ok(Self { params })
    }

    /// Create a hasher from the `[auth.scrypt]` settings
    pub fn from_settings(settings: &ScryptSettings) -> Result<Self, AuthError> {
        Self::new(settings.log_n, settings.r, settings.p)
    }

    /// Hash a password with a fresh random salt
    pub fn hash(&self, plain: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Scrypt
            .hash_password_customized(plain.as_bytes(), None, None, self.params, &salt)
            .map_err(|e| AuthError::Hashing(e.to_string()))?
            .to_string();
        Ok(hash)
    }

    /// Verify a password against a stored digest.
    ///
    /// An unparseable digest is treated like a wrong password.
    pub fn verify(&self, plain: &str, digest: &str) -> bool {
        let Ok(parsed_hash) = PasswordHash::new(digest) else {
            return false;
        };
        Scrypt.verify_password(plain.as_bytes(), &parsed_hash).is_ok()
    }
}

impl Default for CredentialHasher {
    fn default() -> Self {
        Self {
            params: Params::recommended(),
        }
    }
}
