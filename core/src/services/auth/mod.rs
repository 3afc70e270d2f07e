//! Authentication service module
//!
//! This module provides account registration, password login and access-token
//! authentication:
//! - Passwords are hashed with bcrypt off the async executor
//! - Login issues an HS256 access token
//! - Authentication resolves a token back to a live, non-banned account

mod config;
mod password;
mod service;

#[cfg(test)]
mod tests;

pub use config::AuthServiceConfig;
pub use password::{hash_password, verify_password};
pub use service::{AuthService, Registration};
