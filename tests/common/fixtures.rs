//! Test fixtures
//!
//! Real configuration and gateway objects pointed at a mocked upstream.

use super::upstream::MockUpstream;
use btt_trace::config::{
    Config, GatewayConfig, RateLimitConfig, ServerConfig, UpstreamConfig,
};
use btt_trace::core::gateway::TraceGateway;
use btt_trace::core::rate_limiter::RateLimiter;
use std::sync::Arc;

/// Development-mode configuration pointed at `upstream`
pub fn config_for(upstream: &MockUpstream) -> Config {
    Config {
        gateway: GatewayConfig {
            server: ServerConfig {
                environment: "test".to_string(),
                ..Default::default()
            },
            upstream: UpstreamConfig {
                base_url: upstream.base_url(),
                timeout_ms: 500,
                ..Default::default()
            },
            rate_limit: RateLimitConfig::default(),
            ..Default::default()
        },
    }
}

/// Gateway with its own limiter
pub fn gateway_for(config: &Config) -> TraceGateway {
    let limiter = Arc::new(RateLimiter::new(config.rate_limit().clone()));
    TraceGateway::new(config.upstream().clone(), limiter).expect("gateway")
}

/// Header plus identifiers, one per line, with a trailing column
pub fn sample_csv(identifiers: &[&str]) -> String {
    let mut csv = String::from("NO,BTT\n");
    for id in identifiers {
        csv.push_str(id);
        csv.push_str(",extra column\n");
    }
    csv
}
