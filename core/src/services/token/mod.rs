//! Token service module for JWT management
//!
//! Access tokens are HS256-signed JWTs carrying the user id, email and role.
//! There is no refresh flow: a client logs in again once its token expires.

mod service;

#[cfg(test)]
mod tests;

pub use service::TokenService;
