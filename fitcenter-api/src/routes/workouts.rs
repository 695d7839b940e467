/// Workout session endpoints
///
/// # Endpoints
///
/// - `POST /workouts` - Record a session for an existing member
/// - `GET /workouts` - List all sessions
/// - `GET /members/:id/workouts` - List one member's sessions
///
/// Sessions cannot be edited or deleted individually; they go away with
/// their member.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::{IdPath, JsonBody},
    routes::members::{member_not_found, MessageResponse},
};
use axum::{extract::State, http::StatusCode, Json};
use chrono::NaiveDateTime;
use fitcenter_shared::{
    models::{workout_session::date_format, NewWorkoutSession, WorkoutSession},
    validation::{validate_date, validate_positive_integer, validate_required_fields},
};
use serde::{Deserialize, Serialize};

const REQUIRED_FIELDS: [&str; 4] = ["member_id", "date", "duration_minutes", "activity_type"];

/// Session as returned by `GET /workouts`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutResponse {
    pub id: i64,
    pub member_id: i64,
    #[serde(with = "date_format")]
    pub date: NaiveDateTime,
    pub duration_minutes: i32,
    pub activity_type: String,
}

impl From<WorkoutSession> for WorkoutResponse {
    fn from(session: WorkoutSession) -> Self {
        Self {
            id: session.id,
            member_id: session.member_id,
            date: session.date,
            duration_minutes: session.duration_minutes,
            activity_type: session.activity_type,
        }
    }
}

/// Session as returned under a member; `member_id` is implied by the path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberWorkoutResponse {
    pub id: i64,
    #[serde(with = "date_format")]
    pub date: NaiveDateTime,
    pub duration_minutes: i32,
    pub activity_type: String,
}

impl From<WorkoutSession> for MemberWorkoutResponse {
    fn from(session: WorkoutSession) -> Self {
        Self {
            id: session.id,
            date: session.date,
            duration_minutes: session.duration_minutes,
            activity_type: session.activity_type,
        }
    }
}

/// Record a workout session
///
/// Checks run in this order, first failure wins: required fields, date
/// format, member existence, duration, activity type.
///
/// # Endpoint
///
/// ```text
/// POST /workouts
/// Content-Type: application/json
///
/// {
///   "member_id": 1,
///   "date": "2024-06-01 09:00:00",
///   "duration_minutes": 45,
///   "activity_type": "running"
/// }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// { "message": "Workout session added successfully!" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: missing field, bad date, non-positive duration
/// - `404 Not Found`: `member_id` does not name a member
/// - `500 Internal Server Error`: storage failure
pub async fn create_workout(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    const CONTEXT: &str = "Failed to add workout session";

    validate_required_fields(&body, &REQUIRED_FIELDS).map_err(ApiError::BadRequest)?;

    let date = body["date"].as_str().and_then(validate_date).ok_or_else(|| {
        ApiError::BadRequest("Invalid date format. Should be YYYY-MM-DD HH:MM:SS".to_string())
    })?;

    let member_id = body["member_id"]
        .as_i64()
        .ok_or_else(|| ApiError::BadRequest("member_id must be an integer.".to_string()))?;

    // Checked here rather than left to the foreign key so the client gets a 404
    let member = state
        .store
        .find_member(member_id)
        .await
        .map_err(|e| ApiError::storage(CONTEXT, e))?
        .ok_or_else(|| ApiError::NotFound("Member not found for the given member ID.".to_string()))?;

    let duration = &body["duration_minutes"];
    if !validate_positive_integer(duration) {
        return Err(ApiError::BadRequest(
            "Duration must be a positive integer.".to_string(),
        ));
    }
    let duration_minutes = duration
        .as_i64()
        .and_then(|minutes| i32::try_from(minutes).ok())
        .ok_or_else(|| {
            ApiError::BadRequest(format!("Duration must be at most {} minutes.", i32::MAX))
        })?;

    let activity_type = body["activity_type"]
        .as_str()
        .ok_or_else(|| ApiError::BadRequest("Activity type must be a string.".to_string()))?;

    let input = NewWorkoutSession {
        member_id: member.id,
        date,
        duration_minutes,
        activity_type: activity_type.to_string(),
    };
    input.check_limits().map_err(ApiError::BadRequest)?;

    let session = state
        .store
        .create_workout(input)
        .await
        .map_err(|e| ApiError::storage(CONTEXT, e))?;

    tracing::info!(
        session_id = session.id,
        member_id = session.member_id,
        "Workout session created"
    );

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Workout session added successfully!")),
    ))
}

/// List all workout sessions
///
/// ```text
/// GET /workouts
/// ```
///
/// Returns `[{ "id", "member_id", "date", "duration_minutes", "activity_type" }, ...]`.
pub async fn list_workouts(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<WorkoutResponse>>> {
    let sessions = state
        .store
        .list_workouts()
        .await
        .map_err(|e| ApiError::storage("Failed to retrieve workout sessions", e))?;

    Ok(Json(sessions.into_iter().map(WorkoutResponse::from).collect()))
}

/// List one member's workout sessions
///
/// ```text
/// GET /members/:id/workouts
/// ```
///
/// # Errors
///
/// - `404 Not Found`: no member with this id
/// - `500 Internal Server Error`: storage failure
pub async fn list_member_workouts(
    State(state): State<AppState>,
    IdPath(member_id): IdPath,
) -> ApiResult<Json<Vec<MemberWorkoutResponse>>> {
    const CONTEXT: &str = "Failed to retrieve workouts for member";

    state
        .store
        .find_member(member_id)
        .await
        .map_err(|e| ApiError::storage(CONTEXT, e))?
        .ok_or_else(member_not_found)?;

    let sessions = state
        .store
        .list_workouts_for_member(member_id)
        .await
        .map_err(|e| ApiError::storage(CONTEXT, e))?;

    Ok(Json(
        sessions.into_iter().map(MemberWorkoutResponse::from).collect(),
    ))
}
