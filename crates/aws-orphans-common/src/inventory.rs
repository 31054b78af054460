//! Typed raw records as returned by the provider listings
//!
//! The inventory accessor converts SDK responses into these shapes so the
//! reconciler never touches SDK types. Fields the provider may omit are
//! optional here; defaulting happens during reconciliation.

use chrono::{DateTime, Utc};

/// One entry of a security group listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecurityGroupRecord {
    pub group_id: Option<String>,
    pub group_name: Option<String>,
    pub description: Option<String>,
    pub vpc_id: Option<String>,
}

/// One entry of a network interface listing, reduced to its group bindings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkInterfaceRecord {
    pub network_interface_id: Option<String>,
    /// Security groups attached to this interface
    pub group_ids: Vec<String>,
}

/// One entry of an Elastic IP listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressRecord {
    pub allocation_id: Option<String>,
    pub public_ip: Option<String>,
    /// `vpc` or `standard`
    pub domain: Option<String>,
    /// Present while the address is associated with an instance or interface
    pub association_id: Option<String>,
}

/// One entry of a volume listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VolumeRecord {
    pub volume_id: Option<String>,
    pub size_gb: Option<i32>,
    pub volume_type: Option<String>,
    pub availability_zone: Option<String>,
    pub create_time: Option<DateTime<Utc>>,
    pub state: Option<String>,
}
