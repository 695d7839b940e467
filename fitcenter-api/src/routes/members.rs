/// Member endpoints
///
/// CRUD over fitness-center members.
///
/// # Endpoints
///
/// - `POST /members` - Create member
/// - `GET /members` - List members
/// - `GET /members/:id` - Get member
/// - `PUT /members/:id` - Replace member fields
/// - `DELETE /members/:id` - Delete member (and its workout sessions)

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::{IdPath, JsonBody},
};
use axum::{extract::State, http::StatusCode, Json};
use fitcenter_shared::{
    models::{Member, NewMember},
    validation::{validate_email, validate_phone, validate_required_fields},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

const REQUIRED_FIELDS: [&str; 3] = ["name", "email", "phone"];

/// Member as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl From<Member> for MemberResponse {
    fn from(member: Member) -> Self {
        Self {
            id: member.id,
            name: member.name,
            email: member.email,
            phone: member.phone,
        }
    }
}

/// Confirmation body for writes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

/// Validates a create/update body and builds the member input
///
/// Checks run in a fixed order and the first failure is returned:
/// required fields, email format, phone format, then column widths.
pub(crate) fn parse_member(body: &Value) -> ApiResult<NewMember> {
    validate_required_fields(body, &REQUIRED_FIELDS).map_err(ApiError::BadRequest)?;

    let email = body["email"]
        .as_str()
        .filter(|email| validate_email(email))
        .ok_or_else(|| ApiError::BadRequest("Invalid email format.".to_string()))?;

    let phone = body["phone"]
        .as_str()
        .filter(|phone| validate_phone(phone))
        .ok_or_else(|| ApiError::BadRequest("Invalid phone number format.".to_string()))?;

    let name = body["name"]
        .as_str()
        .ok_or_else(|| ApiError::BadRequest("Name must be a string.".to_string()))?;

    let input = NewMember {
        name: name.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
    };
    input.check_limits().map_err(ApiError::BadRequest)?;

    Ok(input)
}

/// Create member
///
/// # Endpoint
///
/// ```text
/// POST /members
/// Content-Type: application/json
///
/// {
///   "name": "Alice",
///   "email": "alice@example.com",
///   "phone": "5551234567"
/// }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// { "message": "Member added successfully!" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: missing field, invalid email or phone
/// - `500 Internal Server Error`: storage failure, including a duplicate email
pub async fn create_member(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    let input = parse_member(&body)?;

    let member = state
        .store
        .create_member(input)
        .await
        .map_err(|e| ApiError::storage("Failed to add member", e))?;

    tracing::info!(member_id = member.id, "Member created");

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Member added successfully!")),
    ))
}

/// List members
///
/// ```text
/// GET /members
/// ```
///
/// Returns `[{ "id", "name", "email", "phone" }, ...]` in id order.
pub async fn list_members(State(state): State<AppState>) -> ApiResult<Json<Vec<MemberResponse>>> {
    let members = state
        .store
        .list_members()
        .await
        .map_err(|e| ApiError::storage("Failed to retrieve members", e))?;

    Ok(Json(members.into_iter().map(MemberResponse::from).collect()))
}

/// Get member by id
///
/// ```text
/// GET /members/:id
/// ```
///
/// # Errors
///
/// - `404 Not Found`: no member with this id
/// - `500 Internal Server Error`: storage failure
pub async fn get_member(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> ApiResult<Json<MemberResponse>> {
    let member = state
        .store
        .find_member(id)
        .await
        .map_err(|e| ApiError::storage("Failed to retrieve member", e))?
        .ok_or_else(member_not_found)?;

    Ok(Json(member.into()))
}

/// Replace a member's name, email and phone
///
/// The member must exist before the body is validated: an unknown id is a
/// 404 even when the body is also invalid.
///
/// # Endpoint
///
/// ```text
/// PUT /members/:id
/// Content-Type: application/json
///
/// { "name": "Alice", "email": "alice@example.com", "phone": "5551234567" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: missing field, invalid email or phone
/// - `404 Not Found`: no member with this id
/// - `500 Internal Server Error`: storage failure, including a duplicate email
pub async fn update_member(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    JsonBody(body): JsonBody,
) -> ApiResult<Json<MessageResponse>> {
    const CONTEXT: &str = "Failed to update member";

    state
        .store
        .find_member(id)
        .await
        .map_err(|e| ApiError::storage(CONTEXT, e))?
        .ok_or_else(member_not_found)?;

    let input = parse_member(&body)?;

    // The row can disappear between the lookup and the write
    state
        .store
        .update_member(id, input)
        .await
        .map_err(|e| ApiError::storage(CONTEXT, e))?
        .ok_or_else(member_not_found)?;

    tracing::info!(member_id = id, "Member updated");

    Ok(Json(MessageResponse::new("Member updated successfully!")))
}

/// Delete member
///
/// Deleting a member also deletes its workout sessions.
///
/// ```text
/// DELETE /members/:id
/// ```
///
/// # Errors
///
/// - `404 Not Found`: no member with this id
/// - `500 Internal Server Error`: storage failure
pub async fn delete_member(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> ApiResult<Json<MessageResponse>> {
    let deleted = state
        .store
        .delete_member(id)
        .await
        .map_err(|e| ApiError::storage("Failed to delete member", e))?;

    if !deleted {
        return Err(member_not_found());
    }

    tracing::info!(member_id = id, "Member deleted");

    Ok(Json(MessageResponse::new("Member deleted successfully!")))
}

pub(crate) fn member_not_found() -> ApiError {
    ApiError::NotFound("Member not found.".to_string())
}
