//! Speaker endpoints

use axum::{extract::State, Json};
use confhub_common::models::{NewSpeaker, Speaker, SpeakerPatch};

use super::extract::{RecordId, ValidJson};
use super::{ApiError, MessageResponse};
use crate::services::speaker_service;
use crate::AppState;

const NOT_FOUND: &str = "Speaker not found";

/// POST /speakers
pub async fn create_speaker(
    State(state): State<AppState>,
    ValidJson(mut payload): ValidJson<NewSpeaker>,
) -> Result<Json<Speaker>, ApiError> {
    payload.validate()?;
    let created = speaker_service::register_speaker(&state.db, &payload).await?;
    Ok(Json(created))
}

/// GET /speakers
pub async fn list_speakers(State(state): State<AppState>) -> Result<Json<Vec<Speaker>>, ApiError> {
    Ok(Json(speaker_service::list_speakers(&state.db).await?))
}

/// GET /speakers/:speaker_id
pub async fn get_speaker(
    State(state): State<AppState>,
    RecordId(speaker_id): RecordId,
) -> Result<Json<Speaker>, ApiError> {
    speaker_service::get_speaker(&state.db, speaker_id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(NOT_FOUND.to_string()))
}

/// PUT /speakers/:speaker_id
pub async fn update_speaker(
    State(state): State<AppState>,
    RecordId(speaker_id): RecordId,
    ValidJson(mut patch): ValidJson<SpeakerPatch>,
) -> Result<Json<Speaker>, ApiError> {
    patch.validate()?;
    speaker_service::modify_speaker(&state.db, speaker_id, &patch)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(NOT_FOUND.to_string()))
}

/// DELETE /speakers/:speaker_id
pub async fn delete_speaker(
    State(state): State<AppState>,
    RecordId(speaker_id): RecordId,
) -> Result<Json<MessageResponse>, ApiError> {
    if !speaker_service::remove_speaker(&state.db, speaker_id).await? {
        return Err(ApiError::NotFound(NOT_FOUND.to_string()));
    }
    Ok(Json(MessageResponse {
        message: "Speaker deleted successfully".to_string(),
    }))
}
