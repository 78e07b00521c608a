// ============================
// crates/backend-lib/src/auth/mod.rs
// ============================
//! Authentication module: credential hashing, bearer tokens and the gateway that
//! ties them to the user directory.

mod error;
pub mod password;
mod service;
mod service_impl;
pub mod token;

pub use error::{AuthError, AuthResult};
pub use password::CredentialHasher;
pub use service::AuthService;
pub use service_impl::DefaultAuth;
pub use token::{bearer_token, Claims, IssuedToken, TokenConfigError, TokenError, TokenService};
