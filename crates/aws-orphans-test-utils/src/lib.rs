//! Shared test utilities for aws-orphans
//!
//! This crate provides common test helpers that can be used across
//! the unit and integration tests without circular dependencies.
//!
//! ## Modules
//!
//! - [`aws`]: AWS region detection for tests that hit real accounts
//! - [`db`]: In-memory SQLite pools
//! - [`fixtures`]: Builders for raw provider records

pub mod aws;
pub mod db;
pub mod fixtures;

// Re-export commonly used items
pub use aws::get_test_region;
pub use db::open_test_db;
