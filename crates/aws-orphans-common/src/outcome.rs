//! Scan outcomes
//!
//! A fleet scan yields one [`RegionOutcome`] per region, in region order. A
//! region either succeeded (possibly with zero orphans) or failed with an
//! attributed error; the two are never conflated.

use crate::records::OrphanedResource;
use crate::resource_kind::ResourceKind;
use serde::Serialize;
use std::fmt;

/// Broad cause of a failed region, used to tell throttling and credential
/// problems apart from other provider errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// No usable credentials, or credentials rejected
    Credentials,
    /// Credentials valid but not allowed to list this resource
    AccessDenied,
    /// Rate limited after transport retries were exhausted
    Throttled,
    /// Region not enabled for the account or unreachable
    RegionUnavailable,
    /// Region pipeline exceeded its time budget
    Timeout,
    /// Any other provider or transport error
    Api,
}

impl FailureKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FailureKind::Credentials => "credentials",
            FailureKind::AccessDenied => "access_denied",
            FailureKind::Throttled => "throttled",
            FailureKind::RegionUnavailable => "region_unavailable",
            FailureKind::Timeout => "timeout",
            FailureKind::Api => "api",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a region could not be scanned
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl ScanFailure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        let message = message.into();
        // A failure must always say something
        let message = if message.trim().is_empty() {
            format!("{kind} error")
        } else {
            message
        };
        Self { kind, message }
    }
}

impl fmt::Display for ScanFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.kind)
    }
}

/// Result of scanning one region for one resource kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionOutcome {
    Success {
        region: String,
        orphans: Vec<OrphanedResource>,
    },
    Failure {
        region: String,
        error: ScanFailure,
    },
}

impl RegionOutcome {
    pub fn success(region: impl Into<String>, orphans: Vec<OrphanedResource>) -> Self {
        RegionOutcome::Success {
            region: region.into(),
            orphans,
        }
    }

    pub fn failure(region: impl Into<String>, error: ScanFailure) -> Self {
        RegionOutcome::Failure {
            region: region.into(),
            error,
        }
    }

    pub fn region(&self) -> &str {
        match self {
            RegionOutcome::Success { region, .. } | RegionOutcome::Failure { region, .. } => region,
        }
    }

    /// Orphans found, empty for failed regions.
    pub fn orphans(&self) -> &[OrphanedResource] {
        match self {
            RegionOutcome::Success { orphans, .. } => orphans,
            RegionOutcome::Failure { .. } => &[],
        }
    }

    pub fn error(&self) -> Option<&ScanFailure> {
        match self {
            RegionOutcome::Success { .. } => None,
            RegionOutcome::Failure { error, .. } => Some(error),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, RegionOutcome::Failure { .. })
    }

    /// JSON object: region, orphans, count and error (null on success).
    pub fn to_json(&self) -> serde_json::Value {
        let orphans: Vec<_> = self.orphans().iter().map(OrphanedResource::to_json).collect();
        serde_json::json!({
            "region": self.region(),
            "count": orphans.len(),
            "orphaned": orphans,
            "error": self.error().map(|e| e.message.clone()),
            "error_kind": self.error().map(|e| e.kind),
        })
    }
}

/// All region outcomes of one fleet scan, in filtered catalog order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FleetOutcome {
    pub kind: ResourceKind,
    pub regions: Vec<RegionOutcome>,
}

impl FleetOutcome {
    pub fn new(kind: ResourceKind, regions: Vec<RegionOutcome>) -> Self {
        Self { kind, regions }
    }

    /// Orphans across all successful regions, in region order.
    pub fn orphans(&self) -> impl Iterator<Item = &OrphanedResource> {
        self.regions.iter().flat_map(|r| r.orphans().iter())
    }

    pub fn total_orphans(&self) -> usize {
        self.regions.iter().map(|r| r.orphans().len()).sum()
    }

    pub fn failures(&self) -> impl Iterator<Item = &RegionOutcome> {
        self.regions.iter().filter(|r| r.is_failure())
    }

    pub fn failed_count(&self) -> usize {
        self.failures().count()
    }

    /// True when at least one region was scanned and none succeeded.
    ///
    /// Such a scan carries no information about the fleet and must not
    /// overwrite a previously stored result.
    pub fn all_failed(&self) -> bool {
        !self.regions.is_empty() && self.regions.iter().all(RegionOutcome::is_failure)
    }

    /// Hand over the orphans of successful regions for storage.
    pub fn into_orphans(self) -> Vec<OrphanedResource> {
        self.regions
            .into_iter()
            .flat_map(|r| match r {
                RegionOutcome::Success { orphans, .. } => orphans,
                RegionOutcome::Failure { .. } => Vec::new(),
            })
            .collect()
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Array(self.regions.iter().map(RegionOutcome::to_json).collect())
    }
}
