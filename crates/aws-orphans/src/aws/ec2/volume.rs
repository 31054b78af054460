//! Unattached EBS volume listing

use super::{Ec2Client, collect_pages};
use anyhow::{Context, Result};
use aws_orphans_common::VolumeRecord;
use aws_orphans_common::defaults::AVAILABLE_VOLUME_STATE;
use aws_sdk_ec2::types::{Filter, Volume};
use chrono::{DateTime, Utc};
use tracing::debug;

impl Ec2Client {
    /// List volumes whose status is `available`, following `NextToken`.
    ///
    /// The state filter runs server-side, so every record returned is
    /// unattached.
    pub async fn list_available_volumes(&self) -> Result<Vec<VolumeRecord>> {
        let volumes = collect_pages(|token| async move {
            let response = self
                .client
                .describe_volumes()
                .filters(available_filter())
                .set_next_token(token)
                .send()
                .await
                .context("Failed to describe volumes")?;

            let page: Vec<_> = response.volumes().iter().map(volume_record).collect();
            Ok::<_, anyhow::Error>((page, response.next_token().map(str::to_string)))
        })
        .await?;

        debug!(region = %self.region(), count = volumes.len(), "Listed available volumes");
        Ok(volumes)
    }
}

/// Server-side filter restricting the listing to unattached volumes.
fn available_filter() -> Filter {
    Filter::builder()
        .name("status")
        .values(AVAILABLE_VOLUME_STATE)
        .build()
}

fn volume_record(volume: &Volume) -> VolumeRecord {
    VolumeRecord {
        volume_id: volume.volume_id().map(str::to_string),
        size_gb: volume.size(),
        volume_type: volume.volume_type().map(|t| t.as_str().to_string()),
        availability_zone: volume.availability_zone().map(str::to_string),
        create_time: volume
            .create_time()
            .and_then(|t| DateTime::<Utc>::from_timestamp(t.secs(), t.subsec_nanos())),
        state: volume.state().map(|s| s.as_str().to_string()),
    }
}
