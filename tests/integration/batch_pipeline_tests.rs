//! Batch runs through the gateway, ending in CSV export

use crate::common::{MockUpstream, config_for, gateway_for, sample_csv};
use btt_trace::config::BatchConfig;
use btt_trace::core::batch::{BatchError, BatchProcessor, NoopProgress, RunState};
use btt_trace::core::export::{CSV_HEADER, to_csv};
use btt_trace::core::types::Outcome;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

fn batch_config() -> BatchConfig {
    BatchConfig::default().with_pacing(Duration::from_millis(10))
}

#[tokio::test]
async fn test_csv_to_csv() {
    let upstream = MockUpstream::start().await;
    upstream.respond("PKG001", 200, MockUpstream::detail("DELIVERED")).await;
    upstream.respond("PKG002", 200, json!({"detail": null})).await;
    upstream.respond("PKG003", 503, json!({"error": "down"})).await;

    let config = config_for(&upstream);
    let gateway = Arc::new(gateway_for(&config));
    let mut processor = BatchProcessor::new(gateway, batch_config());

    let raw = sample_csv(&["PKG001", "PKG002", "bad!", "PKG003"]);
    let outcome = processor.run(&raw, &NoopProgress).await.unwrap();

    assert_eq!(outcome.state, RunState::Done);
    assert_eq!(outcome.results.len(), 3);
    assert_eq!(outcome.succeeded(), 2);
    assert_eq!(upstream.request_count().await, 3);

    let csv = to_csv(&outcome.results);
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], CSV_HEADER);
    assert!(lines[1].starts_with(r#""1","PKG001","2024-03-01 08:15""#));
    assert!(lines[1].ends_with(r#""DELIVERED""#));
    assert_eq!(lines[2], r#""2","PKG002","-","-","-","-""#);
    assert!(lines[3].starts_with(r#""3","PKG003""#));
    assert!(lines[3].ends_with(r#""ERROR""#));
}

#[tokio::test]
async fn test_timeout_is_recorded_and_run_continues() {
    let upstream = MockUpstream::start().await;
    upstream.respond_slowly("SLOW01", Duration::from_secs(3)).await;
    upstream.respond("FAST01", 200, MockUpstream::detail("ON PROCESS")).await;

    let config = config_for(&upstream);
    let mut processor = BatchProcessor::new(Arc::new(gateway_for(&config)), batch_config());

    let outcome = processor
        .run(&sample_csv(&["SLOW01", "FAST01"]), &NoopProgress)
        .await
        .unwrap();

    assert_eq!(outcome.results.len(), 2);
    match &outcome.results[0].outcome {
        Outcome::Error(message) => assert!(message.starts_with("Timeout")),
        other => panic!("expected timeout, got {other:?}"),
    }
    assert!(outcome.results[1].is_ok());
}

#[tokio::test]
async fn test_rate_limited_lookups_become_error_results() {
    let upstream = MockUpstream::start().await;
    for id in ["PKG001", "PKG002", "PKG003"] {
        upstream.respond(id, 200, json!({"detail": null})).await;
    }

    let mut config = config_for(&upstream);
    config.gateway.rate_limit.max_requests = 2;
    config.gateway.rate_limit.allow_list.clear();
    let mut processor = BatchProcessor::new(Arc::new(gateway_for(&config)), batch_config());

    let outcome = processor
        .run(&sample_csv(&["PKG001", "PKG002", "PKG003"]), &NoopProgress)
        .await
        .unwrap();

    assert_eq!(outcome.state, RunState::Done);
    assert_eq!(outcome.succeeded(), 2);
    assert!(
        outcome.results[2]
            .error_message()
            .is_some_and(|m| m.starts_with("Rate limit exceeded"))
    );
    assert_eq!(upstream.request_count().await, 2);
}

#[tokio::test]
async fn test_default_limits_do_not_throttle_a_local_run() {
    let upstream = MockUpstream::start().await;
    upstream
        .respond_to_all(200, MockUpstream::detail("DELIVERED"))
        .await;

    let config = config_for(&upstream);
    let max_requests = config.rate_limit().max_requests as usize;
    let mut processor = BatchProcessor::new(
        Arc::new(gateway_for(&config)),
        BatchConfig::default().with_pacing(Duration::from_millis(1)),
    );

    let ids: Vec<String> = (1..=max_requests + 50)
        .map(|i| format!("PKG{:04}", i))
        .collect();
    let refs: Vec<&str> = ids.iter().map(String::as_str).collect();

    let outcome = processor
        .run(&sample_csv(&refs), &NoopProgress)
        .await
        .unwrap();

    assert_eq!(outcome.state, RunState::Done);
    assert_eq!(outcome.results.len(), ids.len());
    assert!(outcome.results.iter().all(|r| r.error_message().is_none()));
    assert_eq!(upstream.request_count().await, ids.len());
}

#[tokio::test]
async fn test_oversized_input_never_reaches_upstream() {
    let upstream = MockUpstream::start().await;
    let config = config_for(&upstream);
    let mut processor = BatchProcessor::new(
        Arc::new(gateway_for(&config)),
        batch_config().with_max_lines(5),
    );

    let ids: Vec<String> = (1..=6).map(|i| format!("PKG{:03}", i)).collect();
    let refs: Vec<&str> = ids.iter().map(String::as_str).collect();

    let err = processor
        .run(&sample_csv(&refs), &NoopProgress)
        .await
        .unwrap_err();
    assert_eq!(err, BatchError::TooManyLines { count: 6, max: 5 });
    assert_eq!(upstream.request_count().await, 0);
}
