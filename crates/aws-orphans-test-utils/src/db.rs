//! Database test utilities
//!
//! Provides in-memory SQLite database setup for testing.
//!
//! Schema setup is done by the consuming crate since the table definitions
//! live next to the persistence code.

use anyhow::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

/// Database connection pool type alias
pub type TestDbPool = SqlitePool;

/// Create an in-memory SQLite connection pool for testing.
///
/// This creates a fresh database with no schema.
///
/// # Example
///
/// ```ignore
/// use aws_orphans_test_utils::db::open_test_db;
///
/// #[tokio::test]
/// async fn test_database() {
///     let pool = open_test_db().await.unwrap();
///     // Setup schema and run tests...
/// }
/// ```
pub async fn open_test_db() -> Result<TestDbPool> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1) // Single connection for in-memory to maintain state
        .connect_with(options)
        .await?;

    Ok(pool)
}
