//! Conference registration and maintenance

use confhub_common::models::{Conference, ConferencePatch, NewConference};
use confhub_common::{Error, Result};
use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::db::conferences;

/// Register a new conference.
///
/// Scans every stored conference and fails with [`Error::Duplicate`] when one
/// already has the same name and date. The scan and the insert are not
/// atomic; a concurrent registration that slips past the scan is rejected by
/// the table's UNIQUE(name, date) constraint instead.
pub async fn register_conference(pool: &SqlitePool, new: &NewConference) -> Result<Conference> {
    let existing = conferences::get_all_conferences(pool).await?;
    if existing.iter().any(|conf| new.conflicts_with(conf)) {
        warn!(name = %new.name, date = %new.date, "Rejected duplicate conference");
        return Err(Error::Duplicate(
            "Conference with this name and date already exists.".to_string(),
        ));
    }

    let created = conferences::create_conference(pool, new).await?;
    info!(id = created.id, name = %created.name, "Registered conference");
    Ok(created)
}

pub async fn get_conference(pool: &SqlitePool, conference_id: i64) -> Result<Option<Conference>> {
    conferences::get_conference_by_id(pool, conference_id).await
}

pub async fn list_conferences(pool: &SqlitePool) -> Result<Vec<Conference>> {
    conferences::get_all_conferences(pool).await
}

/// Apply a patch; `None` when the conference does not exist
pub async fn modify_conference(
    pool: &SqlitePool,
    conference_id: i64,
    patch: &ConferencePatch,
) -> Result<Option<Conference>> {
    conferences::update_conference(pool, conference_id, patch).await
}

/// Delete a conference; `false` when it did not exist
pub async fn remove_conference(pool: &SqlitePool, conference_id: i64) -> Result<bool> {
    let removed = conferences::delete_conference(pool, conference_id).await?;
    if removed {
        info!(id = conference_id, "Removed conference");
    }
    Ok(removed)
}
