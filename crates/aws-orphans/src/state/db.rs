//! Database setup and schema management

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use tracing::debug;

/// Database connection pool type alias
pub type DbPool = SqlitePool;

/// Open the database at `url`, creating the file and tables if needed.
pub async fn open_db(url: &str) -> Result<DbPool> {
    let options = SqliteConnectOptions::from_str(url)
        .with_context(|| format!("Invalid database URL '{url}'"))?
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .context("Failed to open database")?;

    ensure_schema(&pool).await?;

    Ok(pool)
}

/// Create the three orphan tables if they do not exist.
pub async fn ensure_schema(pool: &DbPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS orphaned_sgs (
            id INTEGER PRIMARY KEY,
            region TEXT NOT NULL,
            group_id TEXT NOT NULL,
            group_name TEXT NOT NULL,
            description TEXT,
            vpc_id TEXT,
            console_url TEXT NOT NULL,
            scanned_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await
    .context("Failed to create orphaned_sgs table")?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS orphaned_eips (
            id INTEGER PRIMARY KEY,
            region TEXT NOT NULL,
            allocation_id TEXT NOT NULL,
            public_ip TEXT NOT NULL,
            domain TEXT NOT NULL,
            console_url TEXT NOT NULL,
            scanned_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await
    .context("Failed to create orphaned_eips table")?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS unattached_ebs (
            id INTEGER PRIMARY KEY,
            region TEXT NOT NULL,
            volume_id TEXT NOT NULL,
            size_gb INTEGER NOT NULL,
            volume_type TEXT NOT NULL,
            availability_zone TEXT NOT NULL,
            create_time TEXT,
            console_url TEXT NOT NULL,
            scanned_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await
    .context("Failed to create unattached_ebs table")?;

    debug!("Database schema ready");
    Ok(())
}

/// In-memory database with the schema applied, for unit tests.
#[cfg(test)]
pub(crate) async fn open_test_db() -> Result<DbPool> {
    let pool = aws_orphans_test_utils::open_test_db().await?;
    ensure_schema(&pool).await?;
    Ok(pool)
}
