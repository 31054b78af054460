//! EC2 console deep links
//!
//! These URLs are stored alongside each row and rendered as hyperlinks, so
//! their format must stay byte-for-byte stable.

/// Console URL for a security group.
pub fn security_group_url(region: &str, group_id: &str) -> String {
    format!(
        "https://{region}.console.aws.amazon.com/ec2/home?region={region}#SecurityGroup:groupId={group_id}"
    )
}

/// Console URL for an Elastic IP allocation.
pub fn elastic_ip_url(region: &str, allocation_id: &str) -> String {
    format!(
        "https://{region}.console.aws.amazon.com/ec2/home?region={region}#ElasticIpDetails:AllocationId={allocation_id}"
    )
}

/// Console URL for an EBS volume.
pub fn volume_url(region: &str, volume_id: &str) -> String {
    format!(
        "https://{region}.console.aws.amazon.com/ec2/v2/home?region={region}#VolumeDetails:VolumeId={volume_id}"
    )
}
