//! Conference table operations

use chrono::NaiveDate;
use confhub_common::models::{Conference, ConferencePatch, NewConference};
use confhub_common::{Error, Result};
use sqlx::SqlitePool;

const DUPLICATE_MSG: &str = "Conference with this name and date already exists.";
const CONSTRAINT_MSG: &str = "Conference still has speakers assigned.";

/// Storage representation of a `conferences` row
#[derive(Debug, sqlx::FromRow)]
struct ConferenceRow {
    id: i64,
    name: String,
    date: NaiveDate,
    location: String,
    description: Option<String>,
}

impl From<ConferenceRow> for Conference {
    fn from(row: ConferenceRow) -> Self {
        Conference {
            id: row.id,
            name: row.name,
            date: row.date,
            location: row.location,
            description: row.description,
        }
    }
}

/// Insert a conference and return it with its assigned id
pub async fn create_conference(pool: &SqlitePool, new: &NewConference) -> Result<Conference> {
    let row = sqlx::query_as::<_, ConferenceRow>(
        r#"
        INSERT INTO conferences (name, date, location, description)
        VALUES (?, ?, ?, ?)
        RETURNING id, name, date, location, description
        "#,
    )
    .bind(&new.name)
    .bind(new.date)
    .bind(&new.location)
    .bind(&new.description)
    .fetch_one(pool)
    .await
    .map_err(|e| Error::from_write(e, DUPLICATE_MSG, CONSTRAINT_MSG))?;

    Ok(row.into())
}

pub async fn get_conference_by_id(pool: &SqlitePool, conference_id: i64) -> Result<Option<Conference>> {
    let row = sqlx::query_as::<_, ConferenceRow>(
        "SELECT id, name, date, location, description FROM conferences WHERE id = ?",
    )
    .bind(conference_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(Conference::from))
}

/// All conferences in insertion order
pub async fn get_all_conferences(pool: &SqlitePool) -> Result<Vec<Conference>> {
    let rows = sqlx::query_as::<_, ConferenceRow>(
        "SELECT id, name, date, location, description FROM conferences ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(Conference::from).collect())
}

/// Apply `patch` to an existing conference.
///
/// A single `UPDATE ... RETURNING` statement: absent slots keep their column
/// value through `COALESCE`, and the description slot carries a separate
/// "present" flag so an explicit null can clear it. Returns `None` when no
/// conference has `conference_id`.
pub async fn update_conference(
    pool: &SqlitePool,
    conference_id: i64,
    patch: &ConferencePatch,
) -> Result<Option<Conference>> {
    let description = patch.description.clone().flatten();

    let row = sqlx::query_as::<_, ConferenceRow>(
        r#"
        UPDATE conferences
        SET name = COALESCE(?, name),
            date = COALESCE(?, date),
            location = COALESCE(?, location),
            description = CASE WHEN ? THEN ? ELSE description END
        WHERE id = ?
        RETURNING id, name, date, location, description
        "#,
    )
    .bind(patch.name.as_deref())
    .bind(patch.date)
    .bind(patch.location.as_deref())
    .bind(patch.description.is_some())
    .bind(description)
    .bind(conference_id)
    .fetch_optional(pool)
    .await
    .map_err(|e| Error::from_write(e, DUPLICATE_MSG, CONSTRAINT_MSG))?;

    Ok(row.map(Conference::from))
}

/// Delete a conference; `false` when nothing matched
pub async fn delete_conference(pool: &SqlitePool, conference_id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM conferences WHERE id = ?")
        .bind(conference_id)
        .execute(pool)
        .await
        .map_err(|e| Error::from_write(e, DUPLICATE_MSG, CONSTRAINT_MSG))?;

    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use confhub_common::db::init_memory_database;

    fn summit() -> NewConference {
        NewConference {
            name: "AI Summit".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            location: "Berlin".to_string(),
            description: None,
        }
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let pool = init_memory_database().await.unwrap();

        let first = create_conference(&pool, &summit()).await.unwrap();
        let mut other = summit();
        other.name = "RustConf".to_string();
        let second = create_conference(&pool, &other).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(first.location, "Berlin");
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let pool = init_memory_database().await.unwrap();
        assert!(get_conference_by_id(&pool, 99).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unique_constraint_surfaces_as_duplicate() {
        let pool = init_memory_database().await.unwrap();
        create_conference(&pool, &summit()).await.unwrap();

        let err = create_conference(&pool, &summit()).await.unwrap_err();
        assert!(matches!(err, Error::Duplicate(_)), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_update_missing_does_not_write() {
        let pool = init_memory_database().await.unwrap();
        let patch = ConferencePatch {
            location: Some("Munich".to_string()),
            ..Default::default()
        };
        assert!(update_conference(&pool, 5, &patch).await.unwrap().is_none());
        assert!(get_all_conferences(&pool).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_persists_only_patched_fields() {
        let pool = init_memory_database().await.unwrap();
        let created = create_conference(&pool, &summit()).await.unwrap();

        let patch = ConferencePatch {
            description: Some(Some("Applied ML".to_string())),
            ..Default::default()
        };
        let updated = update_conference(&pool, created.id, &patch).await.unwrap().unwrap();
        assert_eq!(updated.description.as_deref(), Some("Applied ML"));

        let reloaded = get_conference_by_id(&pool, created.id).await.unwrap().unwrap();
        assert_eq!(reloaded, updated);
        assert_eq!(reloaded.name, "AI Summit");
    }

    #[tokio::test]
    async fn test_empty_patch_keeps_every_column() {
        let pool = init_memory_database().await.unwrap();
        let mut new = summit();
        new.description = Some("Yearly".to_string());
        let created = create_conference(&pool, &new).await.unwrap();

        let updated = update_conference(&pool, created.id, &ConferencePatch::default())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated, created);
    }

    #[tokio::test]
    async fn test_null_description_patch_clears_column() {
        let pool = init_memory_database().await.unwrap();
        let mut new = summit();
        new.description = Some("Yearly".to_string());
        let created = create_conference(&pool, &new).await.unwrap();

        let patch = ConferencePatch {
            description: Some(None),
            ..Default::default()
        };
        let updated = update_conference(&pool, created.id, &patch).await.unwrap().unwrap();
        assert_eq!(updated.description, None);
        assert_eq!(updated.location, "Berlin");
    }

    #[tokio::test]
    async fn test_patch_onto_existing_name_and_date_is_duplicate() {
        let pool = init_memory_database().await.unwrap();
        create_conference(&pool, &summit()).await.unwrap();
        let mut later = summit();
        later.date = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        later.location = "Vienna".to_string();
        let later = create_conference(&pool, &later).await.unwrap();

        let patch = ConferencePatch {
            date: Some(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()),
            location: Some("Prague".to_string()),
            ..Default::default()
        };
        let err = update_conference(&pool, later.id, &patch).await.unwrap_err();
        assert!(matches!(err, Error::Duplicate(_)), "got {:?}", err);
        assert_eq!(err.to_string(), DUPLICATE_MSG);

        let unchanged = get_conference_by_id(&pool, later.id).await.unwrap().unwrap();
        assert_eq!(unchanged, later);
    }

    #[tokio::test]
    async fn test_delete_reports_whether_row_existed() {
        let pool = init_memory_database().await.unwrap();
        let created = create_conference(&pool, &summit()).await.unwrap();

        assert!(delete_conference(&pool, created.id).await.unwrap());
        assert!(!delete_conference(&pool, created.id).await.unwrap());
        assert!(get_all_conferences(&pool).await.unwrap().is_empty());
    }
}
