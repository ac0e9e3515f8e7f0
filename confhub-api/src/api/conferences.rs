//! Conference endpoints

use axum::{extract::State, Json};
use confhub_common::models::{Conference, ConferencePatch, NewConference};

use super::extract::{RecordId, ValidJson};
use super::{ApiError, MessageResponse};
use crate::services::conference_service;
use crate::AppState;

const NOT_FOUND: &str = "Conference not found";

/// POST /conferences
pub async fn create_conference(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<NewConference>,
) -> Result<Json<Conference>, ApiError> {
    payload.validate()?;
    let created = conference_service::register_conference(&state.db, &payload).await?;
    Ok(Json(created))
}

/// GET /conferences
pub async fn list_conferences(
    State(state): State<AppState>,
) -> Result<Json<Vec<Conference>>, ApiError> {
    Ok(Json(conference_service::list_conferences(&state.db).await?))
}

/// GET /conferences/:conference_id
pub async fn get_conference(
    State(state): State<AppState>,
    RecordId(conference_id): RecordId,
) -> Result<Json<Conference>, ApiError> {
    conference_service::get_conference(&state.db, conference_id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(NOT_FOUND.to_string()))
}

/// PUT /conferences/:conference_id
///
/// Only the fields present in the body are changed.
pub async fn update_conference(
    State(state): State<AppState>,
    RecordId(conference_id): RecordId,
    ValidJson(patch): ValidJson<ConferencePatch>,
) -> Result<Json<Conference>, ApiError> {
    patch.validate()?;
    conference_service::modify_conference(&state.db, conference_id, &patch)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(NOT_FOUND.to_string()))
}

/// DELETE /conferences/:conference_id
pub async fn delete_conference(
    State(state): State<AppState>,
    RecordId(conference_id): RecordId,
) -> Result<Json<MessageResponse>, ApiError> {
    if !conference_service::remove_conference(&state.db, conference_id).await? {
        return Err(ApiError::NotFound(NOT_FOUND.to_string()));
    }
    Ok(Json(MessageResponse {
        message: "Conference deleted successfully".to_string(),
    }))
}
