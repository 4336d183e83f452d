mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{patient_payload, TestApp};
use hospital_service::services::init_metrics;
use http_body_util::BodyExt;
use service_core::middleware::REQUEST_ID_HEADER;
use std::sync::Once;

static INIT_METRICS: Once = Once::new();

fn ensure_metrics_initialized() {
    INIT_METRICS.call_once(|| {
        init_metrics();
    });
}

#[tokio::test]
async fn health_check_works() {
    let app = TestApp::new();

    let (status, body) = app.get_json("/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "hospital-service");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn readiness_check_works() {
    let app = TestApp::new();
    let (status, _) = app.get_json("/ready").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn metrics_endpoint_reports_created_entities() {
    ensure_metrics_initialized();
    let app = TestApp::new();

    app.post_json("/patients", &patient_payload("metrics@x.com")).await;
    app.post_json("/appointments", &common::appointment_payload("p-unknown", "d-unknown"))
        .await;

    let request = Request::builder()
        .method(Method::GET)
        .uri("/metrics")
        .body(Body::empty())
        .unwrap();
    let response = app.send(request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(body.contains("entities_created_total"), "got {}", body);
    assert!(body.contains("appointments_rejected_total"), "got {}", body);
    assert!(body.contains("http_requests_total"), "got {}", body);
}

#[tokio::test]
async fn request_id_is_echoed() {
    let app = TestApp::new();

    let request = Request::builder()
        .method(Method::GET)
        .uri("/health")
        .header(REQUEST_ID_HEADER, "req-123")
        .body(Body::empty())
        .unwrap();
    let response = app.send(request).await;

    assert_eq!(response.headers()[REQUEST_ID_HEADER], "req-123");
}

#[tokio::test]
async fn request_id_is_generated_when_absent() {
    let app = TestApp::new();

    let request = Request::builder()
        .method(Method::GET)
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = app.send(request).await;

    assert!(response.headers().contains_key(REQUEST_ID_HEADER));
}
