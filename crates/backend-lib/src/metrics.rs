// ==============
// crates/backend-lib/src/metrics.rs

//! Central place for metric keys
pub const REGISTER_SUCCEEDED: &str = "auth.register.succeeded";
pub const REGISTER_REJECTED: &str = "auth.register.rejected";
pub const LOGIN_SUCCEEDED: &str = "auth.login.succeeded";
pub const LOGIN_FAILED: &str = "auth.login.failed";
pub const TOKEN_REJECTED: &str = "auth.token.rejected";
