//! Main gateway configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Main gateway configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GatewayConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Upstream tracking API configuration
    #[serde(default)]
    pub upstream: UpstreamConfig,
    /// Rate limiting configuration
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    /// Batch client configuration
    #[serde(default)]
    pub batch: BatchConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl GatewayConfig {
    /// Build configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> crate::utils::error::Result<Self> {
        let mut config = Self::default();

        if let Some(host) = env_var("HOST") {
            config.server.host = host;
        }
        if let Some(port) = env_parse("PORT")? {
            config.server.port = port;
        }
        if let Some(environment) = env_var("ENVIRONMENT") {
            config.server.environment = environment;
        }
        if let Some(url) = env_var("UPSTREAM_URL") {
            config.upstream.base_url = url;
        }
        if let Some(timeout) = env_parse("UPSTREAM_TIMEOUT_MS")? {
            config.upstream.timeout_ms = timeout;
        }
        if let Some(max) = env_parse("RATE_LIMIT_MAX")? {
            config.rate_limit.max_requests = max;
        }
        if let Some(window) = env_parse("RATE_LIMIT_WINDOW_SECS")? {
            config.rate_limit.window_secs = window;
        }
        if let Some(list) = env_var("RATE_LIMIT_ALLOW_LIST") {
            config.rate_limit.allow_list = list
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
        }
        if let Some(level) = env_var("LOG_LEVEL") {
            config.logging.level = level;
        }

        Ok(config)
    }

    /// Merge two configurations, with other taking precedence
    pub fn merge(mut self, other: Self) -> Self {
        self.server = self.server.merge(other.server);
        self.upstream = self.upstream.merge(other.upstream);
        self.rate_limit = self.rate_limit.merge(other.rate_limit);
        self.batch = self.batch.merge(other.batch);
        self.logging = self.logging.merge(other.logging);
        self
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn env_parse<T>(name: &str) -> crate::utils::error::Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    env_var(name)
        .map(|raw| {
            raw.trim().parse::<T>().map_err(|e| {
                crate::utils::error::GatewayError::Config(format!("Invalid {}: {}", name, e))
            })
        })
        .transpose()
}
