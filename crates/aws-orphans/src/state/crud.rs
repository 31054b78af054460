//! Write operations for the orphan tables

use super::db::DbPool;
use anyhow::{Context, Result, bail};
use aws_orphans_common::{OrphanedResource, ResourceKind};
use chrono::{DateTime, Utc};
use tracing::info;

/// Replace every row of `kind`'s table with `records`.
///
/// Runs as one transaction: the table is emptied, then each record is
/// inserted with the same `scanned_at`. A record of another kind aborts the
/// whole replacement and leaves the table untouched.
pub async fn replace_orphans(
    pool: &DbPool,
    kind: ResourceKind,
    records: &[OrphanedResource],
    scanned_at: DateTime<Utc>,
) -> Result<u64> {
    if let Some(other) = records.iter().find(|r| r.kind() != kind) {
        bail!(
            "Cannot store {} '{}' in the {} table",
            other.kind(),
            other.primary_id(),
            kind.table_name()
        );
    }

    let scanned_at = scanned_at.to_rfc3339();
    let mut tx = pool.begin().await.context("Failed to start transaction")?;

    sqlx::query(&format!("DELETE FROM {}", kind.table_name()))
        .execute(&mut *tx)
        .await
        .with_context(|| format!("Failed to clear {}", kind.table_name()))?;

    for record in records {
        let console_url = record.console_url();
        let query = match record {
            OrphanedResource::SecurityGroup(sg) => sqlx::query(
                "INSERT INTO orphaned_sgs
                 (region, group_id, group_name, description, vpc_id, console_url, scanned_at)
                 VALUES (?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(&sg.region)
            .bind(&sg.group_id)
            .bind(&sg.group_name)
            .bind(&sg.description)
            .bind(&sg.vpc_id)
            .bind(console_url)
            .bind(&scanned_at),
            OrphanedResource::ElasticIp(eip) => sqlx::query(
                "INSERT INTO orphaned_eips
                 (region, allocation_id, public_ip, domain, console_url, scanned_at)
                 VALUES (?, ?, ?, ?, ?, ?)",
            )
            .bind(&eip.region)
            .bind(&eip.allocation_id)
            .bind(&eip.public_ip)
            .bind(&eip.domain)
            .bind(console_url)
            .bind(&scanned_at),
            OrphanedResource::Volume(vol) => sqlx::query(
                "INSERT INTO unattached_ebs
                 (region, volume_id, size_gb, volume_type, availability_zone, create_time,
                  console_url, scanned_at)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(&vol.region)
            .bind(&vol.volume_id)
            .bind(vol.size_gb)
            .bind(&vol.volume_type)
            .bind(&vol.availability_zone)
            .bind(&vol.create_time)
            .bind(console_url)
            .bind(&scanned_at),
        };

        query
            .execute(&mut *tx)
            .await
            .with_context(|| format!("Failed to insert {}", record.primary_id()))?;
    }

    tx.commit().await.context("Failed to commit replacement")?;

    info!(table = kind.table_name(), rows = records.len(), "Replaced stored orphans");
    Ok(records.len() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::db::open_test_db;
    use aws_orphans_common::{OrphanedElasticIp, OrphanedSecurityGroup};
    use chrono::TimeZone;

    fn eip(region: &str, id: &str) -> OrphanedResource {
        OrphanedElasticIp {
            region: region.to_string(),
            allocation_id: id.to_string(),
            public_ip: "203.0.113.1".to_string(),
            domain: "vpc".to_string(),
        }
        .into()
    }

    async fn count(pool: &DbPool, table: &str) -> i64 {
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn replacement_discards_previous_rows() {
        let pool = open_test_db().await.unwrap();
        let now = Utc::now();

        replace_orphans(&pool, ResourceKind::ElasticIp, &[eip("r1", "a"), eip("r1", "b")], now)
            .await
            .unwrap();
        let written = replace_orphans(&pool, ResourceKind::ElasticIp, &[eip("r2", "c")], now)
            .await
            .unwrap();

        assert_eq!(written, 1);
        assert_eq!(count(&pool, "orphaned_eips").await, 1);
    }

    #[tokio::test]
    async fn batch_shares_one_timestamp() {
        let pool = open_test_db().await.unwrap();
        let scanned_at = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();

        replace_orphans(&pool, ResourceKind::ElasticIp, &[eip("r1", "a"), eip("r2", "b")], scanned_at)
            .await
            .unwrap();

        let stamps: Vec<String> =
            sqlx::query_scalar("SELECT DISTINCT scanned_at FROM orphaned_eips")
                .fetch_all(&pool)
                .await
                .unwrap();
        assert_eq!(stamps, vec![scanned_at.to_rfc3339()]);
    }

    #[tokio::test]
    async fn empty_batch_clears_table() {
        let pool = open_test_db().await.unwrap();
        replace_orphans(&pool, ResourceKind::ElasticIp, &[eip("r1", "a")], Utc::now())
            .await
            .unwrap();

        replace_orphans(&pool, ResourceKind::ElasticIp, &[], Utc::now())
            .await
            .unwrap();
        assert_eq!(count(&pool, "orphaned_eips").await, 0);
    }

    #[tokio::test]
    async fn mismatched_kind_leaves_table_untouched() {
        let pool = open_test_db().await.unwrap();
        replace_orphans(&pool, ResourceKind::ElasticIp, &[eip("r1", "a")], Utc::now())
            .await
            .unwrap();

        let sg: OrphanedResource = OrphanedSecurityGroup {
            region: "r1".to_string(),
            group_id: "sg-1".to_string(),
            group_name: "web".to_string(),
            description: String::new(),
            vpc_id: None,
        }
        .into();

        let err = replace_orphans(&pool, ResourceKind::ElasticIp, &[sg], Utc::now())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("orphaned_eips"));
        assert_eq!(count(&pool, "orphaned_eips").await, 1);
    }
}
