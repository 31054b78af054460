//! Stored row types

use aws_orphans_common::OrphanedResource;
use chrono::{DateTime, Utc};

/// One persisted orphan with the time of the scan that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredOrphan {
    pub record: OrphanedResource,
    pub console_url: String,
    pub scanned_at: DateTime<Utc>,
}

impl StoredOrphan {
    pub fn region(&self) -> &str {
        self.record.region()
    }

    /// The record's JSON fields plus `scanned_at`.
    pub fn to_json(&self) -> serde_json::Value {
        let mut value = self.record.to_json();
        if let serde_json::Value::Object(map) = &mut value {
            map.insert("console_url".to_string(), self.console_url.clone().into());
            map.insert("scanned_at".to_string(), self.scanned_at.to_rfc3339().into());
        }
        value
    }
}
