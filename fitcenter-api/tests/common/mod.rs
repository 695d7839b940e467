//! Shared helpers for the HTTP integration tests
//!
//! Every context gets its own in-memory store, so tests are isolated and
//! need no database.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use fitcenter_api::app::{build_router, AppState};
use fitcenter_api::config::Config;
use fitcenter_shared::db::store::MemoryStore;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::Service as _;

/// Router plus direct access to its store
pub struct TestContext {
    pub store: Arc<MemoryStore>,
    pub app: Router,
}

impl TestContext {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let state = AppState::new(store.clone(), Config::in_memory());

        Self {
            store,
            app: build_router(state),
        }
    }

    /// Sends a request and returns the status with the parsed JSON body
    pub async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.send_request(request).await
    }

    pub async fn send_request(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.app.clone().call(request).await.unwrap();
        let status = response.status();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                panic!("non-JSON body ({}): {}", status, String::from_utf8_lossy(&bytes))
            })
        };

        (status, body)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send("GET", uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send("POST", uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send("PUT", uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send("DELETE", uri, None).await
    }

    /// Creates a member through the API and asserts it succeeded
    pub async fn create_member(&self, name: &str, email: &str) {
        let (status, body) = self
            .post(
                "/members",
                json!({ "name": name, "email": email, "phone": "5551234567" }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create member failed: {body}");
    }
}

pub fn workout(member_id: i64, activity: &str) -> Value {
    json!({
        "member_id": member_id,
        "date": "2024-06-01 09:00:00",
        "duration_minutes": 45,
        "activity_type": activity
    })
}
