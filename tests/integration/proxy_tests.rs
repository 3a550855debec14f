//! Proxy HTTP surface

use crate::common::{MockUpstream, config_for};
use actix_web::http::StatusCode;
use actix_web::{test, web};
use btt_trace::server::server::HttpServer;
use btt_trace::server::state::AppState;
use serde_json::{Value, json};

async fn app_state(upstream: &MockUpstream, max_requests: u32) -> web::Data<AppState> {
    let mut config = config_for(upstream);
    config.gateway.rate_limit.max_requests = max_requests;
    let server = HttpServer::new(&config).await.unwrap();
    web::Data::new(server.state().clone())
}

#[actix_web::test]
async fn test_lookup_round_trip() {
    let upstream = MockUpstream::start().await;
    upstream
        .respond("DKC-2024_01", 200, MockUpstream::detail("DELIVERED"))
        .await;

    let app = test::init_service(HttpServer::create_app(app_state(&upstream, 100).await)).await;
    let req = test::TestRequest::get()
        .uri("/api/trace?b=DKC-2024_01")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["detail"]["status"], "DELIVERED");
    assert_eq!(body["detail"]["posisi"], "Jakarta Hub");
}

#[actix_web::test]
async fn test_rate_limit_is_per_client() {
    let upstream = MockUpstream::start().await;
    upstream
        .respond("PKG001", 200, json!({"detail": null}))
        .await;

    let app = test::init_service(HttpServer::create_app(app_state(&upstream, 1).await)).await;

    let from = |ip: &str| {
        test::TestRequest::get()
            .uri("/api/trace?b=PKG001")
            .peer_addr(format!("{}:40000", ip).parse().unwrap())
            .to_request()
    };

    assert_eq!(test::call_service(&app, from("10.0.0.1")).await.status(), StatusCode::OK);
    assert_eq!(
        test::call_service(&app, from("10.0.0.1")).await.status(),
        StatusCode::TOO_MANY_REQUESTS
    );
    assert_eq!(test::call_service(&app, from("10.0.0.2")).await.status(), StatusCode::OK);

    assert_eq!(upstream.request_count().await, 2);
}

#[actix_web::test]
async fn test_loopback_callers_are_not_limited() {
    let upstream = MockUpstream::start().await;
    upstream
        .respond("PKG001", 200, json!({"detail": null}))
        .await;

    let app = test::init_service(HttpServer::create_app(app_state(&upstream, 1).await)).await;

    for peer in ["127.0.0.1:40000", "[::1]:40000"] {
        for _ in 0..3 {
            let req = test::TestRequest::get()
                .uri("/api/trace?b=PKG001")
                .peer_addr(peer.parse().unwrap())
                .to_request();
            assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
        }
    }

    assert_eq!(upstream.request_count().await, 6);
}

#[actix_web::test]
async fn test_upstream_failure_statuses() {
    let upstream = MockUpstream::start().await;
    upstream
        .respond("PKG404", 404, json!({"message": "secret upstream detail"}))
        .await;

    let app = test::init_service(HttpServer::create_app(app_state(&upstream, 100).await)).await;
    let req = test::TestRequest::get().uri("/api/trace?b=PKG404").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "UPSTREAM_ERROR");
    assert!(!body.to_string().contains("secret upstream detail"));
}

#[actix_web::test]
async fn test_health_and_not_found() {
    let upstream = MockUpstream::start().await;
    let app = test::init_service(HttpServer::create_app(app_state(&upstream, 100).await)).await;

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let health: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(health["status"], "OK");
    assert_eq!(health["environment"], "test");

    let req = test::TestRequest::post().uri("/api/unknown").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["path"], "/api/unknown");
}
