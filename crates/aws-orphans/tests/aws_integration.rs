//! Integration tests against a real AWS account
//!
//! These tests only read inventory and never modify resources.
//! Run with: AWS_PROFILE=sandbox cargo test --test aws_integration -- --ignored

use anyhow::Result;
use aws_orphans::aws::{AwsContext, Ec2Client, Ec2Inventory, FromAwsContext, get_current_account_id};
use aws_orphans::config::ScanSettings;
use aws_orphans::scanner::{SdkInventoryFactory, scan_fleet};
use aws_orphans_common::{RegionCatalog, ResourceKind};
use aws_orphans_test_utils::aws::{get_test_region, has_aws_credentials};

async fn test_context() -> AwsContext {
    AwsContext::load(None, &ScanSettings::default())
        .await
        .for_region(&get_test_region())
}

#[tokio::test]
#[ignore = "requires AWS credentials"]
async fn test_account_preflight() -> Result<()> {
    if !has_aws_credentials() {
        println!("Skipping: no AWS credentials in environment");
        return Ok(());
    }

    let account = get_current_account_id(&test_context().await).await?;
    assert_eq!(account.len(), 12);
    Ok(())
}

#[tokio::test]
#[ignore = "requires AWS credentials"]
async fn test_listings_complete() -> Result<()> {
    if !has_aws_credentials() {
        println!("Skipping: no AWS credentials in environment");
        return Ok(());
    }

    let ec2 = Ec2Client::from_context(&test_context().await);

    let groups = ec2.describe_security_groups().await?;
    // Every VPC has a default group
    assert!(groups.iter().any(|g| g.group_name.as_deref() == Some("default")));

    let volumes = ec2.describe_available_volumes().await?;
    assert!(
        volumes
            .iter()
            .all(|v| v.state.as_deref() == Some("available"))
    );

    ec2.describe_network_interfaces().await?;
    ec2.describe_addresses().await?;
    Ok(())
}

#[tokio::test]
#[ignore = "requires AWS credentials"]
async fn test_single_region_fleet_scan() -> Result<()> {
    if !has_aws_credentials() {
        println!("Skipping: no AWS credentials in environment");
        return Ok(());
    }

    let region = get_test_region();
    let factory = SdkInventoryFactory::new(test_context().await);
    let fleet = scan_fleet(
        &factory,
        &RegionCatalog::new([region.clone()]),
        ResourceKind::SecurityGroup,
        None,
        &ScanSettings::default(),
    )
    .await;

    assert_eq!(fleet.regions.len(), 1);
    assert!(
        fleet.regions[0].error().is_none(),
        "scan failed: {:?}",
        fleet.regions[0].error()
    );
    assert!(fleet.orphans().all(|o| o.region() == region));
    Ok(())
}
