//! Server configuration module

use serde::{Deserialize, Serialize};

use super::{env_or, ConfigError};

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Server host address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Worker threads (0 = number of CPU cores)
    #[serde(default)]
    pub workers: usize,

    /// Maximum JSON body size in bytes
    #[serde(default = "default_max_payload_size")]
    pub max_payload_size: usize,

    /// Seconds to wait for in-flight requests on shutdown
    #[serde(default = "default_shutdown_timeout")]
    pub shutdown_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from("127.0.0.1"),
            port: 5000,
            workers: 0,
            max_payload_size: default_max_payload_size(),
            shutdown_timeout: default_shutdown_timeout(),
        }
    }
}

impl ServerConfig {
    /// Create a new server configuration
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Create from environment variables (`PORT` wins over `SERVER_PORT`)
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let port = match std::env::var("PORT") {
            Ok(_) => env_or("PORT", defaults.port)?,
            Err(_) => env_or("SERVER_PORT", defaults.port)?,
        };

        Ok(Self {
            host: env_or("SERVER_HOST", defaults.host)?,
            port,
            workers: env_or("SERVER_WORKERS", defaults.workers)?,
            max_payload_size: env_or("MAX_PAYLOAD_SIZE", defaults.max_payload_size)?,
            shutdown_timeout: env_or("SHUTDOWN_TIMEOUT", defaults.shutdown_timeout)?,
        })
    }

    /// Get the bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn default_max_payload_size() -> usize {
    2 * 1024 * 1024 // 2 MiB
}

fn default_shutdown_timeout() -> u64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_address() {
        assert_eq!(ServerConfig::new("0.0.0.0", 8080).bind_address(), "0.0.0.0:8080");
        assert_eq!(ServerConfig::default().bind_address(), "127.0.0.1:5000");
    }

    #[test]
    fn test_default_payload_limit_is_two_mebibytes() {
        assert_eq!(ServerConfig::default().max_payload_size, 2_097_152);
    }
}
