//! HTTP handlers. Each one only translates between JSON and the auth gateway.

pub mod auth;
pub mod health;
pub mod user;
