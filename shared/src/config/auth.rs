//! Authentication configuration

use serde::{Deserialize, Serialize};

use super::{env_or, ConfigError, Environment};
use crate::utils::duration::parse_duration_secs;

const DEVELOPMENT_SECRET: &str = "development-secret-please-change-in-production";

/// JWT authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// JWT secret key for signing access tokens
    pub secret: String,

    /// Access token expiry time in seconds
    pub access_token_expiry: i64,

    /// JWT issuer claim
    pub issuer: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEVELOPMENT_SECRET),
            access_token_expiry: 3 * 86_400, // 3 days
            issuer: String::from("dasvilson"),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set access token expiry in seconds
    pub fn with_expiry_seconds(mut self, seconds: i64) -> Self {
        self.access_token_expiry = seconds;
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEVELOPMENT_SECRET
    }
}

/// Password hashing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PasswordConfig {
    /// bcrypt cost factor (4..=31)
    pub bcrypt_cost: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self { bcrypt_cost: 12 }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// Password hashing configuration
    #[serde(default)]
    pub password: PasswordConfig,
}

impl AuthConfig {
    /// Create from environment variables
    ///
    /// The signing secret is mandatory in production; other environments fall
    /// back to a development secret.
    pub fn from_env(environment: Environment) -> Result<Self, ConfigError> {
        let secret = match std::env::var("JWT_ACCESS_TOKEN_SECRET") {
            Ok(secret) if !secret.trim().is_empty() => secret,
            _ if environment.is_production() => {
                return Err(ConfigError::Missing("JWT_ACCESS_TOKEN_SECRET"))
            }
            _ => String::from(DEVELOPMENT_SECRET),
        };

        let expiry_raw = env_or("JWT_ACCESS_TOKEN_EXPIRY", String::from("3d"))?;
        let access_token_expiry = parse_duration_secs(&expiry_raw).map_err(|reason| {
            ConfigError::Invalid {
                key: "JWT_ACCESS_TOKEN_EXPIRY",
                reason,
            }
        })?;

        let bcrypt_cost = env_or("BCRYPT_SALT_ROUNDS", PasswordConfig::default().bcrypt_cost)?;
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(ConfigError::Invalid {
                key: "BCRYPT_SALT_ROUNDS",
                reason: format!("cost {} outside 4..=31", bcrypt_cost),
            });
        }

        Ok(Self {
            jwt: JwtConfig {
                secret,
                access_token_expiry: access_token_expiry as i64,
                issuer: env_or("JWT_ISSUER", String::from("dasvilson"))?,
            },
            password: PasswordConfig { bcrypt_cost },
        })
    }
}
