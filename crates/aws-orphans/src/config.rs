//! Scan settings and configuration errors

use aws_orphans_common::defaults::{
    DEFAULT_MAX_ATTEMPTS, DEFAULT_MAX_CONCURRENCY, DEFAULT_OPERATION_TIMEOUT_SECS,
    DEFAULT_REGION_TIMEOUT_SECS,
};
use std::time::Duration;
use thiserror::Error;

/// Configuration problems detected before any scanning starts
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("No database URL configured. Set DATABASE_URL or pass --database-url (e.g. sqlite://orphans.db)")]
    MissingDatabaseUrl,

    #[error("Concurrency must be at least 1, got {0}")]
    InvalidConcurrency(usize),

    #[error("{0} timeout must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error("Max attempts must be at least 1")]
    ZeroAttempts,

    #[error("None of the requested regions are known: {}", requested.join(", "))]
    NoRegionsSelected { requested: Vec<String> },
}

/// Knobs shared by every region of a fleet scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanSettings {
    /// Never report security groups named `default`
    pub exclude_default_sg: bool,
    /// Regions scanned at the same time
    pub max_concurrency: usize,
    /// Budget for one region's whole pipeline
    pub region_timeout: Duration,
    /// Budget for a single SDK operation, retries included
    pub operation_timeout: Duration,
    /// SDK standard retry attempts per operation
    pub max_attempts: u32,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            exclude_default_sg: true,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            region_timeout: Duration::from_secs(DEFAULT_REGION_TIMEOUT_SECS),
            operation_timeout: Duration::from_secs(DEFAULT_OPERATION_TIMEOUT_SECS),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl ScanSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_concurrency == 0 {
            return Err(ConfigError::InvalidConcurrency(self.max_concurrency));
        }
        if self.region_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout("Region"));
        }
        if self.operation_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout("Operation"));
        }
        if self.max_attempts == 0 {
            return Err(ConfigError::ZeroAttempts);
        }
        Ok(())
    }
}

/// Resolve the database URL, failing before any AWS call when it is missing.
pub fn require_database_url(url: Option<&str>) -> Result<String, ConfigError> {
    match url.map(str::trim) {
        Some(url) if !url.is_empty() => Ok(url.to_string()),
        _ => Err(ConfigError::MissingDatabaseUrl),
    }
}
