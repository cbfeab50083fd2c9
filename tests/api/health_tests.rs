//! Health Check and Metrics API Tests

use pretty_assertions::assert_eq;
use serde_json::Value;
use test_case::test_case;

use crate::common::TestApp;

#[test_case("/health" ; "basic")]
#[test_case("/health/live" ; "liveness")]
#[tokio::test]
async fn test_health_probes_need_no_token(path: &str) {
    let app = TestApp::new();

    let response = app.server.get(path).await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_readiness_reports_the_store() {
    let app = TestApp::new();

    let response = app.server.get("/health/ready").await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["store"]["backend"], "memory");
}

#[tokio::test]
async fn test_metrics_count_requests_by_route_template() {
    let app = TestApp::new();
    app.server.get("/health").await.assert_status_ok();
    app.server.get("/vehicle/12/").await;

    let response = app.server.get("/metrics").await;

    response.assert_status_ok();
    let text = response.text();
    assert!(text.contains("fleet_server_http_requests_total"));
    assert!(text.contains("path=\"/health\""));
    assert!(text.contains("path=\"/vehicle/{id}/\""));
}
