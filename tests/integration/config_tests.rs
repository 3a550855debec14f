//! Configuration loading and validation

use btt_trace::config::{Config, Validate};
use btt_trace::GatewayError;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_yaml(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[tokio::test]
async fn test_partial_file_keeps_defaults() {
    let file = write_yaml("server:\n  port: 8081\n");
    let config = Config::from_file(file.path()).await.unwrap();

    assert_eq!(config.server().port, 8081);
    assert_eq!(config.server().host, "0.0.0.0");
    assert_eq!(config.upstream().timeout_ms, 10_000);
    assert_eq!(config.rate_limit().max_requests, 100);
    assert_eq!(config.rate_limit().window_secs, 60);
    assert_eq!(config.batch().max_lines, 1000);
    assert_eq!(config.batch().pacing_ms, 200);
}

#[tokio::test]
async fn test_invalid_upstream_url_is_rejected() {
    let file = write_yaml("upstream:\n  base_url: \"ftp://example.com/\"\n");
    let err = Config::from_file(file.path()).await.unwrap_err();
    assert!(matches!(err, GatewayError::Config(_)));
}

#[tokio::test]
async fn test_malformed_yaml_is_rejected() {
    let file = write_yaml("server: [unclosed\n");
    assert!(Config::from_file(file.path()).await.is_err());
}

#[test]
fn test_disabled_rate_limit_skips_its_validation() {
    let mut config = Config::default();
    config.gateway.rate_limit.enabled = false;
    config.gateway.rate_limit.max_requests = 0;
    assert!(config.gateway.validate().is_ok());

    config.gateway.rate_limit.enabled = true;
    assert!(config.gateway.validate().is_err());
}
