//! Rate limiting configuration module

use serde::{Deserialize, Serialize};

use super::{env_or, ConfigError};

/// A fixed-window limit: at most `max` hits per `window_seconds`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct WindowLimit {
    /// Max requests per window
    pub max: u32,

    /// Window length in seconds
    pub window_seconds: u64,
}

impl WindowLimit {
    pub const fn new(max: u32, window_seconds: u64) -> Self {
        Self { max, window_seconds }
    }
}

/// Rate limiting configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RateLimitConfig {
    /// Enable rate limiting
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Every request, keyed by client IP
    pub global: WindowLimit,

    /// Failed login attempts, keyed by client IP
    pub login: WindowLimit,

    /// Admin endpoints, keyed by user id (client IP when anonymous)
    pub admin: WindowLimit,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            global: WindowLimit::new(100, 15 * 60),
            login: WindowLimit::new(5, 15 * 60),
            admin: WindowLimit::new(100, 60),
        }
    }
}

impl RateLimitConfig {
    /// Rate limiting switched off entirely
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            enabled: env_or("RATE_LIMIT_ENABLED", defaults.enabled)?,
            global: WindowLimit::new(
                env_or("RATE_LIMIT_GLOBAL_MAX", defaults.global.max)?,
                env_or("RATE_LIMIT_GLOBAL_WINDOW", defaults.global.window_seconds)?,
            ),
            login: WindowLimit::new(
                env_or("RATE_LIMIT_LOGIN_MAX", defaults.login.max)?,
                env_or("RATE_LIMIT_LOGIN_WINDOW", defaults.login.window_seconds)?,
            ),
            admin: WindowLimit::new(
                env_or("RATE_LIMIT_ADMIN_MAX", defaults.admin.max)?,
                env_or("RATE_LIMIT_ADMIN_WINDOW", defaults.admin.window_seconds)?,
            ),
        })
    }
}

fn default_enabled() -> bool {
    true
}
