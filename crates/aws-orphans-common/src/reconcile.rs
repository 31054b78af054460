//! Orphan reconciliation
//!
//! Pure functions from raw provider listings to orphan records. No I/O and no
//! failure modes: missing fields fall back to defaults and empty inputs give
//! empty (or complete) outputs. Output order follows the resource listing.

use crate::defaults::{DEFAULT_EIP_DOMAIN, DEFAULT_SECURITY_GROUP_NAME};
use crate::inventory::{AddressRecord, NetworkInterfaceRecord, SecurityGroupRecord, VolumeRecord};
use crate::records::{OrphanedElasticIp, OrphanedSecurityGroup, UnattachedVolume};
use std::collections::HashSet;

/// Every security group id referenced by at least one network interface.
pub fn used_security_group_ids(interfaces: &[NetworkInterfaceRecord]) -> HashSet<&str> {
    interfaces
        .iter()
        .flat_map(|eni| eni.group_ids.iter())
        .map(String::as_str)
        .collect()
}

/// Security groups that no network interface references.
///
/// With `exclude_default` set, groups named `default` are never reported
/// since they cannot be deleted.
pub fn orphaned_security_groups(
    region: &str,
    groups: &[SecurityGroupRecord],
    interfaces: &[NetworkInterfaceRecord],
    exclude_default: bool,
) -> Vec<OrphanedSecurityGroup> {
    let used = used_security_group_ids(interfaces);

    groups
        .iter()
        .filter_map(|sg| {
            let group_id = sg.group_id.as_deref().unwrap_or_default();
            let group_name = sg.group_name.as_deref().unwrap_or_default();

            if used.contains(group_id) {
                return None;
            }
            if exclude_default && group_name == DEFAULT_SECURITY_GROUP_NAME {
                return None;
            }

            Some(OrphanedSecurityGroup {
                region: region.to_string(),
                group_id: group_id.to_string(),
                group_name: group_name.to_string(),
                description: sg.description.clone().unwrap_or_default(),
                vpc_id: sg.vpc_id.clone(),
            })
        })
        .collect()
}

/// Elastic IPs with no association id (absent or empty).
pub fn orphaned_elastic_ips(region: &str, addresses: &[AddressRecord]) -> Vec<OrphanedElasticIp> {
    addresses
        .iter()
        .filter(|a| a.association_id.as_deref().is_none_or(str::is_empty))
        .map(|a| OrphanedElasticIp {
            region: region.to_string(),
            allocation_id: a.allocation_id.clone().unwrap_or_default(),
            public_ip: a.public_ip.clone().unwrap_or_default(),
            domain: a
                .domain
                .clone()
                .unwrap_or_else(|| DEFAULT_EIP_DOMAIN.to_string()),
        })
        .collect()
}

/// Project a listing of `available` volumes into records.
///
/// The listing is already filtered server-side, so every input yields exactly
/// one output in the same order.
pub fn unattached_volumes(region: &str, volumes: &[VolumeRecord]) -> Vec<UnattachedVolume> {
    volumes
        .iter()
        .map(|v| UnattachedVolume {
            region: region.to_string(),
            volume_id: v.volume_id.clone().unwrap_or_default(),
            size_gb: v.size_gb.map(i64::from).unwrap_or_default(),
            volume_type: v.volume_type.clone().unwrap_or_default(),
            availability_zone: v.availability_zone.clone().unwrap_or_default(),
            create_time: v
                .create_time
                .map(|t| t.to_rfc3339())
                .unwrap_or_default(),
        })
        .collect()
}
