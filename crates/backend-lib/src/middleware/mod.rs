// crates/backend-lib/src/middleware/mod.rs

//! Middleware for the `Gatekeeper` HTTP server.

pub mod access_guard;

pub use access_guard::{require_bearer, AuthenticatedUser};
