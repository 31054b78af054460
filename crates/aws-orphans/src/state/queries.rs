//! Query operations for the orphan tables

use super::db::DbPool;
use super::types::StoredOrphan;
use anyhow::{Context, Result};
use aws_orphans_common::{
    OrphanedElasticIp, OrphanedResource, OrphanedSecurityGroup, ResourceKind, UnattachedVolume,
};
use chrono::{DateTime, Utc};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

/// All stored rows of `kind`, sorted by region then primary identifier.
pub async fn fetch_orphans(pool: &DbPool, kind: ResourceKind) -> Result<Vec<StoredOrphan>> {
    let sql = match kind {
        ResourceKind::SecurityGroup => {
            "SELECT region, group_id, group_name, description, vpc_id, console_url, scanned_at
             FROM orphaned_sgs ORDER BY region, group_id"
        }
        ResourceKind::ElasticIp => {
            "SELECT region, allocation_id, public_ip, domain, console_url, scanned_at
             FROM orphaned_eips ORDER BY region, allocation_id"
        }
        ResourceKind::Volume => {
            "SELECT region, volume_id, size_gb, volume_type, availability_zone, create_time,
                    console_url, scanned_at
             FROM unattached_ebs ORDER BY region, volume_id"
        }
    };

    let rows = sqlx::query(sql)
        .fetch_all(pool)
        .await
        .with_context(|| format!("Failed to read {}", kind.table_name()))?;

    rows.iter().map(|row| stored_orphan(kind, row)).collect()
}

/// Number of stored rows of `kind`.
pub async fn count_orphans(pool: &DbPool, kind: ResourceKind) -> Result<i64> {
    let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", kind.table_name()))
        .fetch_one(pool)
        .await
        .with_context(|| format!("Failed to count rows in {}", kind.table_name()))?;
    Ok(count)
}

fn stored_orphan(kind: ResourceKind, row: &SqliteRow) -> Result<StoredOrphan> {
    let scanned_at_str: String = row.get("scanned_at");
    let scanned_at = DateTime::parse_from_rfc3339(&scanned_at_str)
        .context("Invalid scanned_at timestamp")?
        .with_timezone(&Utc);

    let record: OrphanedResource = match kind {
        ResourceKind::SecurityGroup => OrphanedSecurityGroup {
            region: row.get("region"),
            group_id: row.get("group_id"),
            group_name: row.get("group_name"),
            description: row
                .get::<Option<String>, _>("description")
                .unwrap_or_default(),
            vpc_id: row.get("vpc_id"),
        }
        .into(),
        ResourceKind::ElasticIp => OrphanedElasticIp {
            region: row.get("region"),
            allocation_id: row.get("allocation_id"),
            public_ip: row.get("public_ip"),
            domain: row.get("domain"),
        }
        .into(),
        ResourceKind::Volume => UnattachedVolume {
            region: row.get("region"),
            volume_id: row.get("volume_id"),
            size_gb: row.get("size_gb"),
            volume_type: row.get("volume_type"),
            availability_zone: row.get("availability_zone"),
            create_time: row
                .get::<Option<String>, _>("create_time")
                .unwrap_or_default(),
        }
        .into(),
    };

    Ok(StoredOrphan {
        record,
        console_url: row.get("console_url"),
        scanned_at,
    })
}
