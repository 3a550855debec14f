//! Server configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
    /// Deployment environment (`production` hides internal error detail)
    #[serde(default = "default_environment")]
    pub environment: String,
    /// Use the first `X-Forwarded-For` hop to identify callers.
    /// Only enable behind a trusted reverse proxy.
    #[serde(default)]
    pub trust_forwarded_for: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            environment: default_environment(),
            trust_forwarded_for: false,
        }
    }
}

impl ServerConfig {
    /// Merge server configurations
    pub fn merge(mut self, other: Self) -> Self {
        if other.host != default_host() {
            self.host = other.host;
        }
        if other.port != default_port() {
            self.port = other.port;
        }
        if other.environment != default_environment() {
            self.environment = other.environment;
        }
        if other.trust_forwarded_for {
            self.trust_forwarded_for = other.trust_forwarded_for;
        }
        self
    }

    /// Get the server address
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Whether the server runs in production mode
    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_config_default() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.environment, "development");
        assert!(!config.is_production());
        assert_eq!(config.address(), "0.0.0.0:3000");
    }

    #[test]
    fn test_is_production_case_insensitive() {
        let config = ServerConfig {
            environment: "Production".to_string(),
            ..Default::default()
        };
        assert!(config.is_production());
    }

    #[test]
    fn test_server_config_merge() {
        let base = ServerConfig::default();
        let other = ServerConfig {
            port: 8080,
            environment: "production".to_string(),
            ..Default::default()
        };
        let merged = base.merge(other);
        assert_eq!(merged.port, 8080);
        assert_eq!(merged.host, "0.0.0.0");
        assert!(merged.is_production());
    }
}
