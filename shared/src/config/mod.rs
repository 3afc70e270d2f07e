//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical business areas:
//! - `auth` - JWT signing and password hashing configuration
//! - `environment` - Environment detection and logging configuration
//! - `rate_limit` - Fixed-window limits for global, login and admin traffic
//! - `server` - HTTP bind address and body limits
//!
//! The configuration is built once in `main` and handed to every component
//! that needs it; nothing reads the process environment after startup.

pub mod auth;
pub mod environment;
pub mod rate_limit;
pub mod server;

use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// Re-export commonly used types
pub use auth::{AuthConfig, JwtConfig, PasswordConfig};
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use rate_limit::{RateLimitConfig, WindowLimit};
pub use server::ServerConfig;

/// Errors raised while assembling configuration from the environment
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Authentication configuration
    pub auth: AuthConfig,

    /// Rate limiting configuration
    pub rate_limit: RateLimitConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::development()
    }
}

impl AppConfig {
    /// Create configuration for development environment
    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig::default(),
            auth: AuthConfig::default(),
            rate_limit: RateLimitConfig::default(),
            logging: LoggingConfig::for_environment(Environment::Development),
        }
    }

    /// Create configuration for production environment
    pub fn production(jwt_secret: impl Into<String>) -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig::new("0.0.0.0", 5000),
            auth: AuthConfig {
                jwt: JwtConfig::new(jwt_secret),
                ..Default::default()
            },
            rate_limit: RateLimitConfig::default(),
            logging: LoggingConfig::for_environment(Environment::Production),
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = Environment::from_env();

        Ok(Self {
            environment,
            server: ServerConfig::from_env()?,
            auth: AuthConfig::from_env(environment)?,
            rate_limit: RateLimitConfig::from_env()?,
            logging: LoggingConfig::from_env(environment),
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment.is_production()
    }

    /// Whether error responses may carry stack information
    pub fn expose_stack(&self) -> bool {
        self.environment.exposes_stack()
    }
}

/// Read an environment variable and parse it, falling back to `default` when unset
pub(crate) fn env_or<T>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => {
            raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
                key,
                reason: e.to_string(),
            })
        }
        _ => Ok(default),
    }
}
