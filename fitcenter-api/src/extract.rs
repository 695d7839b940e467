/// Request extractors with JSON error bodies
///
/// Axum's stock `Json` and `Path` extractors reject with plain-text bodies.
/// These wrappers route the rejection through [`ApiError`] so every failure
/// the API returns is `{"error": ...}`.

use crate::error::ApiError;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{FromRequest, FromRequestParts, Path};
use axum::Json;
use serde::Deserialize;
use serde_json::Value;

/// Raw JSON request body
///
/// Handlers receive the untyped value so that presence and type rules can be
/// checked field by field, in a fixed order, before anything is persisted.
/// Unparseable bodies are rejected with 400.
#[derive(Debug, Deserialize, FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct JsonBody(pub Value);

/// Integer id taken from the route path
///
/// A segment that is not an integer does not name any row, so it is
/// rejected with 404 like an unknown id.
#[derive(Debug, Clone, Copy, Deserialize, FromRequestParts)]
#[from_request(via(Path), rejection(ApiError))]
pub struct IdPath(pub i64);

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!(reason = %rejection.body_text(), "Rejected path parameter");
        ApiError::NotFound("Resource not found.".to_string())
    }
}
