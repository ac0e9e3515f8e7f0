//! Database initialization
//!
//! Opens (or creates) the SQLite store and makes sure the `conferences` and
//! `speakers` tables exist. Table creation is idempotent and safe to run on
//! every startup.

use crate::config::DatabaseConfig;
use crate::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

/// Open the configured database file and create tables if needed
pub async fn init_database(config: &DatabaseConfig) -> Result<SqlitePool> {
    let db_path = &config.path;
    let newly_created = !db_path.exists();

    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    // Foreign keys are a per-connection setting in SQLite, so they go on the
    // connect options rather than a one-off PRAGMA against the pool
    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_millis(5000));

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    create_schema(&pool).await?;

    Ok(pool)
}

/// In-memory database with the full schema
///
/// Limited to a single connection that is never recycled: every SQLite
/// `:memory:` connection is a separate database.
pub async fn init_memory_database() -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    create_schema(&pool).await?;

    Ok(pool)
}

/// Create all tables (idempotent)
pub async fn create_schema(pool: &SqlitePool) -> Result<()> {
    create_conferences_table(pool).await?;
    create_speakers_table(pool).await?;
    Ok(())
}

async fn create_conferences_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS conferences (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            date TEXT NOT NULL,
            location TEXT NOT NULL,
            description TEXT,
            UNIQUE (name, date)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_speakers_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS speakers (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            specialty TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE,
            conference_id INTEGER NOT NULL REFERENCES conferences(id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_speakers_conference ON speakers(conference_id)")
        .execute(pool)
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn table_names(pool: &SqlitePool) -> Vec<String> {
        sqlx::query_scalar::<_, String>(
            "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
        )
        .fetch_all(pool)
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_memory_database_has_both_tables() {
        let pool = init_memory_database().await.unwrap();
        assert_eq!(table_names(&pool).await, vec!["conferences", "speakers"]);
    }

    #[tokio::test]
    async fn test_create_schema_is_idempotent() {
        let pool = init_memory_database().await.unwrap();
        create_schema(&pool).await.expect("second run should succeed");
        create_schema(&pool).await.expect("third run should succeed");
        assert_eq!(table_names(&pool).await.len(), 2);
    }

    #[tokio::test]
    async fn test_init_database_creates_file_and_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("nested").join("confhub.db");
        let config = DatabaseConfig {
            path: db_path.clone(),
            max_connections: 2,
        };

        let pool = init_database(&config).await.unwrap();
        assert!(db_path.exists());
        assert_eq!(table_names(&pool).await, vec!["conferences", "speakers"]);
        pool.close().await;

        // Reopening an existing file keeps working
        let pool = init_database(&config).await.unwrap();
        assert_eq!(table_names(&pool).await.len(), 2);
    }

    #[tokio::test]
    async fn test_foreign_keys_enforced() {
        let pool = init_memory_database().await.unwrap();
        let result = sqlx::query(
            "INSERT INTO speakers (name, specialty, email, conference_id) VALUES ('a', 'b', 'c@d.io', 42)",
        )
        .execute(&pool)
        .await;
        assert!(result.is_err(), "orphan speaker insert should be rejected");
    }
}
