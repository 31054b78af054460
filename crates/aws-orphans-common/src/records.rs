//! Orphaned resource records
//!
//! These are the rows handed to storage and reports. The console URL is
//! derived from region and primary identifier on demand and only materialized
//! when a record is serialized or stored.

use crate::console;
use crate::resource_kind::ResourceKind;
use serde::Serialize;

/// Security group not attached to any network interface
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrphanedSecurityGroup {
    pub region: String,
    pub group_id: String,
    pub group_name: String,
    pub description: String,
    pub vpc_id: Option<String>,
}

impl OrphanedSecurityGroup {
    pub fn console_url(&self) -> String {
        console::security_group_url(&self.region, &self.group_id)
    }
}

/// Elastic IP without an association
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrphanedElasticIp {
    pub region: String,
    pub allocation_id: String,
    pub public_ip: String,
    pub domain: String,
}

impl OrphanedElasticIp {
    pub fn console_url(&self) -> String {
        console::elastic_ip_url(&self.region, &self.allocation_id)
    }
}

/// EBS volume in the `available` state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnattachedVolume {
    pub region: String,
    pub volume_id: String,
    pub size_gb: i64,
    pub volume_type: String,
    pub availability_zone: String,
    /// RFC 3339 creation time, empty when the provider did not report one
    pub create_time: String,
}

impl UnattachedVolume {
    pub fn console_url(&self) -> String {
        console::volume_url(&self.region, &self.volume_id)
    }
}

/// Any orphaned resource, one variant per scannable kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrphanedResource {
    SecurityGroup(OrphanedSecurityGroup),
    ElasticIp(OrphanedElasticIp),
    Volume(UnattachedVolume),
}

impl OrphanedResource {
    pub fn kind(&self) -> ResourceKind {
        match self {
            OrphanedResource::SecurityGroup(_) => ResourceKind::SecurityGroup,
            OrphanedResource::ElasticIp(_) => ResourceKind::ElasticIp,
            OrphanedResource::Volume(_) => ResourceKind::Volume,
        }
    }

    pub fn region(&self) -> &str {
        match self {
            OrphanedResource::SecurityGroup(r) => &r.region,
            OrphanedResource::ElasticIp(r) => &r.region,
            OrphanedResource::Volume(r) => &r.region,
        }
    }

    /// Group id, allocation id or volume id.
    pub fn primary_id(&self) -> &str {
        match self {
            OrphanedResource::SecurityGroup(r) => &r.group_id,
            OrphanedResource::ElasticIp(r) => &r.allocation_id,
            OrphanedResource::Volume(r) => &r.volume_id,
        }
    }

    pub fn console_url(&self) -> String {
        match self {
            OrphanedResource::SecurityGroup(r) => r.console_url(),
            OrphanedResource::ElasticIp(r) => r.console_url(),
            OrphanedResource::Volume(r) => r.console_url(),
        }
    }

    /// JSON object with the record's fields plus `console_url`.
    pub fn to_json(&self) -> serde_json::Value {
        #[derive(Serialize)]
        struct WithUrl<'a, T: Serialize> {
            #[serde(flatten)]
            record: &'a T,
            console_url: String,
        }

        let console_url = self.console_url();
        let value = match self {
            OrphanedResource::SecurityGroup(record) => {
                serde_json::to_value(WithUrl { record, console_url })
            }
            OrphanedResource::ElasticIp(record) => {
                serde_json::to_value(WithUrl { record, console_url })
            }
            OrphanedResource::Volume(record) => {
                serde_json::to_value(WithUrl { record, console_url })
            }
        };
        // Plain structs of strings and integers always serialize
        value.unwrap_or(serde_json::Value::Null)
    }
}

impl From<OrphanedSecurityGroup> for OrphanedResource {
    fn from(record: OrphanedSecurityGroup) -> Self {
        OrphanedResource::SecurityGroup(record)
    }
}

impl From<OrphanedElasticIp> for OrphanedResource {
    fn from(record: OrphanedElasticIp) -> Self {
        OrphanedResource::ElasticIp(record)
    }
}

impl From<UnattachedVolume> for OrphanedResource {
    fn from(record: UnattachedVolume) -> Self {
        OrphanedResource::Volume(record)
    }
}
