//! Speaker registration and maintenance

use confhub_common::models::{NewSpeaker, Speaker, SpeakerPatch};
use confhub_common::{Error, Result};
use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::db::speakers;

/// Register a new speaker.
///
/// Email addresses are unique across all conferences. The referenced
/// conference is not looked up here; the storage foreign key rejects
/// unknown ids.
pub async fn register_speaker(pool: &SqlitePool, new: &NewSpeaker) -> Result<Speaker> {
    let existing = speakers::get_all_speakers(pool).await?;
    if existing.iter().any(|spk| new.conflicts_with(spk)) {
        warn!(email = %new.email, "Rejected duplicate speaker");
        return Err(Error::Duplicate(
            "Speaker with this email already exists.".to_string(),
        ));
    }

    let created = speakers::create_speaker(pool, new).await?;
    info!(
        id = created.id,
        conference_id = created.conference_id,
        "Registered speaker"
    );
    Ok(created)
}

pub async fn get_speaker(pool: &SqlitePool, speaker_id: i64) -> Result<Option<Speaker>> {
    speakers::get_speaker_by_id(pool, speaker_id).await
}

pub async fn list_speakers(pool: &SqlitePool) -> Result<Vec<Speaker>> {
    speakers::get_all_speakers(pool).await
}

pub async fn modify_speaker(
    pool: &SqlitePool,
    speaker_id: i64,
    patch: &SpeakerPatch,
) -> Result<Option<Speaker>> {
    speakers::update_speaker(pool, speaker_id, patch).await
}

pub async fn remove_speaker(pool: &SqlitePool, speaker_id: i64) -> Result<bool> {
    let removed = speakers::delete_speaker(pool, speaker_id).await?;
    if removed {
        info!(id = speaker_id, "Removed speaker");
    }
    Ok(removed)
}
