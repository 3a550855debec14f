//! Configuration validators
//!
//! Validation implementations for each gateway configuration section.

use super::Validate;
use crate::config::models::*;
use tracing::debug;
use url::Url;

impl Validate for GatewayConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating gateway configuration");

        self.server.validate()?;
        self.upstream.validate()?;
        self.rate_limit.validate()?;
        self.batch.validate()?;
        self.logging.validate()?;

        debug!("Gateway configuration validation completed");
        Ok(())
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<(), String> {
        if self.host.is_empty() {
            return Err("Server host cannot be empty".to_string());
        }

        if self.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }

        if self.environment.trim().is_empty() {
            return Err("Server environment cannot be empty".to_string());
        }

        Ok(())
    }
}

impl Validate for UpstreamConfig {
    fn validate(&self) -> Result<(), String> {
        validate_http_url(&self.base_url, "Upstream base_url")?;

        if self.timeout_ms == 0 {
            return Err("Upstream timeout_ms must be greater than 0".to_string());
        }

        if self.connect_timeout_ms == 0 {
            return Err("Upstream connect_timeout_ms must be greater than 0".to_string());
        }

        if self.user_agent.trim().is_empty() {
            return Err("Upstream user_agent cannot be empty".to_string());
        }

        Ok(())
    }
}

impl Validate for RateLimitConfig {
    fn validate(&self) -> Result<(), String> {
        if !self.enabled {
            return Ok(());
        }

        if self.max_requests == 0 {
            return Err("Rate limit max_requests must be greater than 0".to_string());
        }

        if self.window_secs == 0 {
            return Err("Rate limit window_secs must be greater than 0".to_string());
        }

        if self.max_tracked_keys == 0 {
            return Err("Rate limit max_tracked_keys must be greater than 0".to_string());
        }

        if self.allow_list.iter().any(|k| k.trim().is_empty()) {
            return Err("Rate limit allow_list cannot contain empty keys".to_string());
        }

        Ok(())
    }
}

impl Validate for BatchConfig {
    fn validate(&self) -> Result<(), String> {
        if self.max_lines == 0 {
            return Err("Batch max_lines must be greater than 0".to_string());
        }

        if self.max_file_bytes == 0 {
            return Err("Batch max_file_bytes must be greater than 0".to_string());
        }

        validate_http_url(&self.proxy_url, "Batch proxy_url")
    }
}

impl Validate for LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        if self.level.trim().is_empty() {
            return Err("Logging level cannot be empty".to_string());
        }
        Ok(())
    }
}

fn validate_http_url(url_str: &str, context: &str) -> Result<(), String> {
    let url = Url::parse(url_str)
        .map_err(|e| format!("{} has invalid URL format: {}", context, e))?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(format!(
                "{} must use http:// or https:// scheme, got: {}",
                context, scheme
            ));
        }
    }

    if url.host_str().is_none() {
        return Err(format!("{} URL must have a valid host", context));
    }

    Ok(())
}
