//! Shared setup for hospital-service integration tests.
//!
//! Requests are driven through the router in-process against the in-memory
//! store, so no database or open port is needed.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use hospital_service::config::{
    HospitalConfig, MongoConfig, StoreBackend, StoreConfig, TimeoutConfig,
};
use hospital_service::services::EntityStore;
use hospital_service::startup::{build_router, AppState};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use service_core::config::Config as CoreConfig;
use tower::ServiceExt;

pub fn test_config() -> HospitalConfig {
    HospitalConfig {
        common: CoreConfig {
            port: 0,
            log_level: "info".to_string(),
        },
        mongodb: MongoConfig {
            uri: std::env::var("TEST_MONGODB_URI")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            database: format!("hospital_test_{}", uuid::Uuid::new_v4().simple()),
            users_database: format!("users_test_{}", uuid::Uuid::new_v4().simple()),
        },
        store: StoreConfig {
            backend: StoreBackend::Memory,
        },
        timeouts: TimeoutConfig::default(),
        otlp_endpoint: None,
    }
}

pub struct TestApp {
    pub router: Router,
    pub store: EntityStore,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_store(test_config(), EntityStore::in_memory())
    }

    pub fn with_store(config: HospitalConfig, store: EntityStore) -> Self {
        let router = build_router(AppState::new(config, store.clone()));
        Self { router, store }
    }

    pub async fn send(&self, request: Request<Body>) -> Response {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible")
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> (StatusCode, Value) {
        self.post_raw(path, body.to_string()).await
    }

    pub async fn post_raw(&self, path: &str, body: impl Into<Body>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::POST)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body.into())
            .unwrap();
        into_json(self.send(request).await).await
    }

    pub async fn get_json(&self, path: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::GET)
            .uri(path)
            .body(Body::empty())
            .unwrap();
        into_json(self.send(request).await).await
    }

    /// Creates a patient and returns its identifier.
    pub async fn create_patient(&self, email: &str) -> String {
        let (status, body) = self.post_json("/patients", &patient_payload(email)).await;
        assert_eq!(status, StatusCode::CREATED, "unexpected body: {}", body);
        body["id"].as_str().unwrap().to_string()
    }

    /// Creates a doctor and returns its identifier.
    pub async fn create_doctor(&self, email: &str) -> String {
        let (status, body) = self.post_json("/doctors", &doctor_payload(email)).await;
        assert_eq!(status, StatusCode::CREATED, "unexpected body: {}", body);
        body["id"].as_str().unwrap().to_string()
    }
}

pub async fn into_json(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    (status, body)
}

pub fn patient_payload(email: &str) -> Value {
    json!({
        "name": "A",
        "email": email,
        "age": 30,
        "gender": "F",
        "bloodGroup": "O+",
        "contactNo": "123"
    })
}

pub fn doctor_payload(email: &str) -> Value {
    json!({
        "name": "Gregory House",
        "email": email,
        "specialization": "Diagnostics",
        "department": "Internal Medicine",
        "contactNo": "555-0100"
    })
}

pub fn appointment_payload(patient_id: &str, doctor_id: &str) -> Value {
    json!({
        "patientId": patient_id,
        "doctorId": doctor_id,
        "dateTime": "2024-01-01T00:00:00Z",
        "description": "checkup"
    })
}

/// Strips the server-assigned fields so a response can be compared with the
/// payload that produced it.
pub fn without_server_fields(mut record: Value) -> Value {
    if let Some(object) = record.as_object_mut() {
        object.remove("id");
        object.remove("createdAt");
    }
    record
}
