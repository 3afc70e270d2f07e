//! Shared utilities and common types for the Dasvilson server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded once at startup
//! - Response envelopes written on the wire
//! - Pagination metadata
//! - Validation helpers (email format, field issues)

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, ConfigError, Environment, JwtConfig, LoggingConfig, RateLimitConfig,
    ServerConfig, WindowLimit,
};
pub use types::{ErrorEnvelope, Pagination, PaginationMeta, ResponseStatus, SuccessEnvelope, ValidationIssue};
