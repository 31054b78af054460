//! Region scan orchestrator

use super::factory::InventoryFactory;
use crate::aws::{AwsError, Ec2Inventory, classify_anyhow_error};
use crate::config::ScanSettings;
use anyhow::Result;
use aws_orphans_common::reconcile;
use aws_orphans_common::{FailureKind, OrphanedResource, RegionOutcome, ResourceKind, ScanFailure};
use tracing::{debug, warn};

/// List and reconcile one resource kind in one region.
///
/// Errors from the inventory are returned unchanged.
pub async fn find_orphans<I: Ec2Inventory>(
    inventory: &I,
    region: &str,
    kind: ResourceKind,
    exclude_default_sg: bool,
) -> Result<Vec<OrphanedResource>> {
    let orphans: Vec<OrphanedResource> = match kind {
        ResourceKind::SecurityGroup => {
            let groups = inventory.describe_security_groups().await?;
            let interfaces = inventory.describe_network_interfaces().await?;
            reconcile::orphaned_security_groups(region, &groups, &interfaces, exclude_default_sg)
                .into_iter()
                .map(Into::into)
                .collect()
        }
        ResourceKind::ElasticIp => {
            let addresses = inventory.describe_addresses().await?;
            reconcile::orphaned_elastic_ips(region, &addresses)
                .into_iter()
                .map(Into::into)
                .collect()
        }
        ResourceKind::Volume => {
            let volumes = inventory.describe_available_volumes().await?;
            reconcile::unattached_volumes(region, &volumes)
                .into_iter()
                .map(Into::into)
                .collect()
        }
    };

    Ok(orphans)
}

/// Scan one region, never failing.
///
/// Client construction, listing and reconciliation run under the region
/// timeout. Any error becomes a `Failure` outcome carrying its classified kind
/// and message. No retries happen here.
pub async fn scan_region<F: InventoryFactory>(
    factory: &F,
    region: &str,
    kind: ResourceKind,
    settings: &ScanSettings,
) -> RegionOutcome {
    let pipeline = async {
        let inventory = factory.connect(region)?;
        find_orphans(&inventory, region, kind, settings.exclude_default_sg).await
    };

    match tokio::time::timeout(settings.region_timeout, pipeline).await {
        Ok(Ok(orphans)) => {
            debug!(region = %region, kind = %kind, count = orphans.len(), "Region scanned");
            RegionOutcome::success(region, orphans)
        }
        Ok(Err(e)) => {
            let classified = classify_anyhow_error(&e);
            let failure =
                ScanFailure::new(classified.failure_kind(), failure_message(&e, &classified));
            warn!(
                region = %region,
                kind = %kind,
                failure_kind = %failure.kind,
                error = %failure.message,
                "Region scan failed"
            );
            RegionOutcome::failure(region, failure)
        }
        Err(_) => {
            let failure = ScanFailure::new(
                FailureKind::Timeout,
                format!(
                    "Scan did not finish within {}s",
                    settings.region_timeout.as_secs()
                ),
            );
            warn!(region = %region, kind = %kind, "Region scan timed out");
            RegionOutcome::failure(region, failure)
        }
    }
}

/// Outermost context plus the classified provider detail, without repeating
/// the context when the detail already contains it.
fn failure_message(error: &anyhow::Error, classified: &AwsError) -> String {
    let context = error.to_string();
    let detail = classified.to_string();
    if detail.contains(&context) {
        detail
    } else {
        format!("{context}: {detail}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aws::ec2::MockEc2Inventory;
    use aws_orphans_common::{AddressRecord, NetworkInterfaceRecord, SecurityGroupRecord};
    use std::time::Duration;

    fn sg(id: &str, name: &str) -> SecurityGroupRecord {
        SecurityGroupRecord {
            group_id: Some(id.to_string()),
            group_name: Some(name.to_string()),
            ..Default::default()
        }
    }

    /// Factory handing out one prepared mock
    struct OneShot(std::sync::Mutex<Option<MockEc2Inventory>>);

    impl OneShot {
        fn new(mock: MockEc2Inventory) -> Self {
            Self(std::sync::Mutex::new(Some(mock)))
        }
    }

    impl InventoryFactory for OneShot {
        type Inventory = MockEc2Inventory;

        fn connect(&self, _region: &str) -> Result<MockEc2Inventory> {
            self.0
                .lock()
                .map_err(|_| anyhow::anyhow!("poisoned"))?
                .take()
                .ok_or_else(|| anyhow::anyhow!("already connected"))
        }
    }

    #[tokio::test]
    async fn security_groups_join_against_interfaces() {
        let mut mock = MockEc2Inventory::new();
        mock.expect_describe_security_groups()
            .times(1)
            .returning(|| Ok(vec![sg("sg-1", "default"), sg("sg-2", "web"), sg("sg-3", "db")]));
        mock.expect_describe_network_interfaces()
            .times(1)
            .returning(|| {
                Ok(vec![NetworkInterfaceRecord {
                    network_interface_id: Some("eni-1".to_string()),
                    group_ids: vec!["sg-3".to_string()],
                }])
            });

        let orphans = find_orphans(&mock, "r1", ResourceKind::SecurityGroup, true)
            .await
            .unwrap();
        let ids: Vec<_> = orphans.iter().map(|o| o.primary_id()).collect();
        assert_eq!(ids, vec!["sg-2"]);
        assert_eq!(orphans[0].region(), "r1");
    }

    #[tokio::test]
    async fn elastic_ips_need_no_second_listing() {
        let mut mock = MockEc2Inventory::new();
        mock.expect_describe_addresses().times(1).returning(|| {
            Ok(vec![
                AddressRecord {
                    allocation_id: Some("eipalloc-free".to_string()),
                    association_id: Some(String::new()),
                    ..Default::default()
                },
                AddressRecord {
                    allocation_id: Some("eipalloc-used".to_string()),
                    association_id: Some("eipassoc-1".to_string()),
                    ..Default::default()
                },
            ])
        });

        let orphans = find_orphans(&mock, "r1", ResourceKind::ElasticIp, true)
            .await
            .unwrap();
        assert_eq!(orphans.len(), 1);
        assert_eq!(orphans[0].primary_id(), "eipalloc-free");
    }

    #[tokio::test]
    async fn listing_error_becomes_failure() {
        let mut mock = MockEc2Inventory::new();
        mock.expect_describe_available_volumes()
            .returning(|| Err(anyhow::anyhow!("RequestLimitExceeded: slow down")));

        let outcome = scan_region(
            &OneShot::new(mock),
            "r1",
            ResourceKind::Volume,
            &ScanSettings::default(),
        )
        .await;

        let error = outcome.error().expect("should be a failure");
        assert_eq!(error.kind, FailureKind::Throttled);
        assert!(error.message.contains("RequestLimitExceeded"));
        assert!(outcome.orphans().is_empty());
    }

    #[tokio::test]
    async fn connect_error_becomes_failure() {
        let factory = OneShot(std::sync::Mutex::new(None));
        let outcome = scan_region(
            &factory,
            "r1",
            ResourceKind::ElasticIp,
            &ScanSettings::default(),
        )
        .await;

        assert_eq!(outcome.region(), "r1");
        assert_eq!(outcome.error().map(|e| e.kind), Some(FailureKind::Api));
    }

    #[tokio::test]
    async fn empty_region_is_success_not_failure() {
        let mut mock = MockEc2Inventory::new();
        mock.expect_describe_security_groups()
            .returning(|| Ok(vec![]));
        mock.expect_describe_network_interfaces()
            .returning(|| Ok(vec![]));

        let outcome = scan_region(
            &OneShot::new(mock),
            "r2",
            ResourceKind::SecurityGroup,
            &ScanSettings::default(),
        )
        .await;

        assert_eq!(outcome, RegionOutcome::success("r2", vec![]));
    }

    /// Inventory that never answers
    struct Hanging;

    impl Ec2Inventory for Hanging {
        async fn describe_security_groups(&self) -> Result<Vec<SecurityGroupRecord>> {
            std::future::pending().await
        }
        async fn describe_network_interfaces(&self) -> Result<Vec<NetworkInterfaceRecord>> {
            std::future::pending().await
        }
        async fn describe_addresses(&self) -> Result<Vec<AddressRecord>> {
            std::future::pending().await
        }
        async fn describe_available_volumes(
            &self,
        ) -> Result<Vec<aws_orphans_common::VolumeRecord>> {
            std::future::pending().await
        }
    }

    struct HangingFactory;

    impl InventoryFactory for HangingFactory {
        type Inventory = Hanging;

        fn connect(&self, _region: &str) -> Result<Hanging> {
            Ok(Hanging)
        }
    }

    #[tokio::test(start_paused = true)]
    async fn slow_region_times_out() {
        let settings = ScanSettings {
            region_timeout: Duration::from_secs(5),
            ..Default::default()
        };

        let outcome = scan_region(&HangingFactory, "r1", ResourceKind::Volume, &settings).await;
        let error = outcome.error().expect("should time out");
        assert_eq!(error.kind, FailureKind::Timeout);
        assert!(error.message.contains("5s"));
    }
}
