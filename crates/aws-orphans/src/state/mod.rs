//! SQLite persistence of the latest scan per resource kind
//!
//! Each kind has one table that is fully replaced by every `populate` run.
//! Uses sqlx for async database access with a connection pool.

mod crud;
mod db;
mod queries;
mod types;

pub use crud::replace_orphans;
pub use db::{DbPool, ensure_schema, open_db};
pub use queries::{count_orphans, fetch_orphans};
pub use types::StoredOrphan;
