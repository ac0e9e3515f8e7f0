//! Speaker table operations

use confhub_common::models::{NewSpeaker, Speaker, SpeakerPatch};
use confhub_common::{Error, Result};
use sqlx::SqlitePool;

const DUPLICATE_MSG: &str = "Speaker with this email already exists.";
const CONSTRAINT_MSG: &str = "Conference referenced by conference_id does not exist.";

/// Storage representation of a `speakers` row
#[derive(Debug, sqlx::FromRow)]
struct SpeakerRow {
    id: i64,
    name: String,
    specialty: String,
    email: String,
    conference_id: i64,
}

impl From<SpeakerRow> for Speaker {
    fn from(row: SpeakerRow) -> Self {
        Speaker {
            id: row.id,
            name: row.name,
            specialty: row.specialty,
            email: row.email,
            conference_id: row.conference_id,
        }
    }
}

/// Insert a speaker and return it with its assigned id
pub async fn create_speaker(pool: &SqlitePool, new: &NewSpeaker) -> Result<Speaker> {
    let row = sqlx::query_as::<_, SpeakerRow>(
        r#"
        INSERT INTO speakers (name, specialty, email, conference_id)
        VALUES (?, ?, ?, ?)
        RETURNING id, name, specialty, email, conference_id
        "#,
    )
    .bind(&new.name)
    .bind(&new.specialty)
    .bind(&new.email)
    .bind(new.conference_id)
    .fetch_one(pool)
    .await
    .map_err(|e| Error::from_write(e, DUPLICATE_MSG, CONSTRAINT_MSG))?;

    Ok(row.into())
}

pub async fn get_speaker_by_id(pool: &SqlitePool, speaker_id: i64) -> Result<Option<Speaker>> {
    let row = sqlx::query_as::<_, SpeakerRow>(
        "SELECT id, name, specialty, email, conference_id FROM speakers WHERE id = ?",
    )
    .bind(speaker_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(Speaker::from))
}

/// All speakers in insertion order
pub async fn get_all_speakers(pool: &SqlitePool) -> Result<Vec<Speaker>> {
    let rows = sqlx::query_as::<_, SpeakerRow>(
        "SELECT id, name, specialty, email, conference_id FROM speakers ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(Speaker::from).collect())
}

/// Apply `patch` to an existing speaker in one statement.
///
/// Returns `None` when no speaker has `speaker_id`.
pub async fn update_speaker(
    pool: &SqlitePool,
    speaker_id: i64,
    patch: &SpeakerPatch,
) -> Result<Option<Speaker>> {
    let row = sqlx::query_as::<_, SpeakerRow>(
        r#"
        UPDATE speakers
        SET name = COALESCE(?, name),
            specialty = COALESCE(?, specialty),
            email = COALESCE(?, email),
            conference_id = COALESCE(?, conference_id)
        WHERE id = ?
        RETURNING id, name, specialty, email, conference_id
        "#,
    )
    .bind(patch.name.as_deref())
    .bind(patch.specialty.as_deref())
    .bind(patch.email.as_deref())
    .bind(patch.conference_id)
    .bind(speaker_id)
    .fetch_optional(pool)
    .await
    .map_err(|e| Error::from_write(e, DUPLICATE_MSG, CONSTRAINT_MSG))?;

    Ok(row.map(Speaker::from))
}

/// Delete a speaker; `false` when nothing matched
pub async fn delete_speaker(pool: &SqlitePool, speaker_id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM speakers WHERE id = ?")
        .bind(speaker_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
