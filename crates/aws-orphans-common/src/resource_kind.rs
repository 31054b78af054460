//! Scannable resource kinds
//!
//! Each kind has its own provider listing, its own notion of "in use" and its
//! own storage table.

use std::fmt;
use std::str::FromStr;

/// Types of AWS resources the scanner can report as orphaned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// Security group not referenced by any network interface
    SecurityGroup,
    /// Elastic IP without an association
    ElasticIp,
    /// EBS volume in the `available` state
    Volume,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 3] = [
        ResourceKind::SecurityGroup,
        ResourceKind::ElasticIp,
        ResourceKind::Volume,
    ];

    /// Stable identifier used on the command line and in JSON output.
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceKind::SecurityGroup => "security-groups",
            ResourceKind::ElasticIp => "elastic-ips",
            ResourceKind::Volume => "volumes",
        }
    }

    /// Parse a kind from its identifier or a common short alias.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "security-groups" | "security-group" | "sg" | "sgs" => Some(ResourceKind::SecurityGroup),
            "elastic-ips" | "elastic-ip" | "eip" | "eips" => Some(ResourceKind::ElasticIp),
            "volumes" | "volume" | "ebs" => Some(ResourceKind::Volume),
            _ => None,
        }
    }

    /// Human label used in report lines ("No orphaned security groups.").
    pub fn label(self) -> &'static str {
        match self {
            ResourceKind::SecurityGroup => "security group",
            ResourceKind::ElasticIp => "Elastic IP",
            ResourceKind::Volume => "EBS volume",
        }
    }

    pub fn label_plural(self) -> &'static str {
        match self {
            ResourceKind::SecurityGroup => "security groups",
            ResourceKind::ElasticIp => "Elastic IPs",
            ResourceKind::Volume => "EBS volumes",
        }
    }

    /// Storage table holding the latest scan for this kind.
    pub fn table_name(self) -> &'static str {
        match self {
            ResourceKind::SecurityGroup => "orphaned_sgs",
            ResourceKind::ElasticIp => "orphaned_eips",
            ResourceKind::Volume => "unattached_ebs",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown resource kind
#[derive(Debug, thiserror::Error)]
#[error("unknown resource kind '{0}' (expected security-groups, elastic-ips or volumes)")]
pub struct UnknownResourceKind(pub String);

impl FromStr for ResourceKind {
    type Err = UnknownResourceKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResourceKind::parse(s).ok_or_else(|| UnknownResourceKind(s.to_string()))
    }
}
