//! Builders for raw provider records
//!
//! Keep test setup to one line per resource.

use aws_orphans_common::{AddressRecord, NetworkInterfaceRecord, SecurityGroupRecord, VolumeRecord};
use chrono::{DateTime, TimeZone, Utc};

/// Security group in a VPC, described as "test group".
pub fn security_group(group_id: &str, group_name: &str) -> SecurityGroupRecord {
    SecurityGroupRecord {
        group_id: Some(group_id.to_string()),
        group_name: Some(group_name.to_string()),
        description: Some("test group".to_string()),
        vpc_id: Some("vpc-test".to_string()),
    }
}

/// Network interface referencing the given groups.
pub fn interface(group_ids: &[&str]) -> NetworkInterfaceRecord {
    NetworkInterfaceRecord {
        network_interface_id: Some(format!("eni-{}", group_ids.join("-"))),
        group_ids: group_ids.iter().map(|g| g.to_string()).collect(),
    }
}

/// VPC address with an optional association.
pub fn address(allocation_id: &str, public_ip: &str, association_id: Option<&str>) -> AddressRecord {
    AddressRecord {
        allocation_id: Some(allocation_id.to_string()),
        public_ip: Some(public_ip.to_string()),
        domain: Some("vpc".to_string()),
        association_id: association_id.map(str::to_string),
    }
}

/// Available gp3 volume created at [`fixed_time`].
pub fn volume(volume_id: &str, size_gb: i32, availability_zone: &str) -> VolumeRecord {
    VolumeRecord {
        volume_id: Some(volume_id.to_string()),
        size_gb: Some(size_gb),
        volume_type: Some("gp3".to_string()),
        availability_zone: Some(availability_zone.to_string()),
        create_time: Some(fixed_time()),
        state: Some("available".to_string()),
    }
}

/// 2024-03-01T12:30:00Z
pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0)
        .single()
        .unwrap_or_default()
}
