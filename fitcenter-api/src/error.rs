/// Error handling for the API server
///
/// Handlers return `ApiResult<T>`; the error side renders as a JSON body of
/// the form `{"error": "<message>"}` with the matching status code.
///
/// # Example
///
/// ```
/// use fitcenter_api::error::{ApiError, ApiResult};
/// use axum::Json;
/// use serde_json::{json, Value};
///
/// async fn handler(id: i64) -> ApiResult<Json<Value>> {
///     if id <= 0 {
///         return Err(ApiError::NotFound("Member not found.".to_string()));
///     }
///     Ok(Json(json!({ "id": id })))
/// }
/// ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use fitcenter_shared::db::store::StoreError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug)]
pub enum ApiError {
    /// Missing or malformed input (400)
    BadRequest(String),

    /// Referenced id does not exist (404)
    NotFound(String),

    /// Storage failure; the message carries the cause and is sent to the
    /// client (500)
    Storage(String),
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ApiError {
    /// Wraps a storage failure as `"<context>: <cause>"`
    ///
    /// Constraint violations are client-triggered and logged at warn level;
    /// connectivity and unknown failures at error level.
    pub fn storage(context: &str, err: StoreError) -> Self {
        if err.is_constraint_violation() {
            tracing::warn!(error = %err, "{}", context);
        } else {
            tracing::error!(error = %err, "{}", context);
        }
        ApiError::Storage(format!("{}: {}", context, err))
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::Storage(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = match self {
            ApiError::BadRequest(msg) | ApiError::NotFound(msg) | ApiError::Storage(msg) => msg,
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
