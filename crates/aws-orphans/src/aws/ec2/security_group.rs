//! Security group and network interface listings

use super::{Ec2Client, collect_pages};
use anyhow::{Context, Result};
use aws_orphans_common::{NetworkInterfaceRecord, SecurityGroupRecord};
use aws_sdk_ec2::types::{NetworkInterface, SecurityGroup};
use tracing::debug;

impl Ec2Client {
    /// List every security group in the region, following `NextToken`.
    pub async fn list_security_groups(&self) -> Result<Vec<SecurityGroupRecord>> {
        let groups = collect_pages(|token| async move {
            let response = self
                .client
                .describe_security_groups()
                .set_next_token(token)
                .send()
                .await
                .context("Failed to describe security groups")?;

            let page: Vec<_> = response
                .security_groups()
                .iter()
                .map(security_group_record)
                .collect();
            Ok::<_, anyhow::Error>((page, response.next_token().map(str::to_string)))
        })
        .await?;

        debug!(region = %self.region(), count = groups.len(), "Listed security groups");
        Ok(groups)
    }

    /// List every network interface in the region, keeping only the ids of
    /// the groups attached to it.
    pub async fn list_network_interfaces(&self) -> Result<Vec<NetworkInterfaceRecord>> {
        let interfaces = collect_pages(|token| async move {
            let response = self
                .client
                .describe_network_interfaces()
                .set_next_token(token)
                .send()
                .await
                .context("Failed to describe network interfaces")?;

            let page: Vec<_> = response
                .network_interfaces()
                .iter()
                .map(network_interface_record)
                .collect();
            Ok::<_, anyhow::Error>((page, response.next_token().map(str::to_string)))
        })
        .await?;

        debug!(region = %self.region(), count = interfaces.len(), "Listed network interfaces");
        Ok(interfaces)
    }
}

fn security_group_record(sg: &SecurityGroup) -> SecurityGroupRecord {
    SecurityGroupRecord {
        group_id: sg.group_id().map(str::to_string),
        group_name: sg.group_name().map(str::to_string),
        description: sg.description().map(str::to_string),
        vpc_id: sg.vpc_id().map(str::to_string),
    }
}

fn network_interface_record(eni: &NetworkInterface) -> NetworkInterfaceRecord {
    NetworkInterfaceRecord {
        network_interface_id: eni.network_interface_id().map(str::to_string),
        group_ids: eni
            .groups()
            .iter()
            .filter_map(|g| g.group_id())
            .map(str::to_string)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_ec2::types::GroupIdentifier;

    #[test]
    fn converts_security_group_without_vpc() {
        let sg = SecurityGroup::builder()
            .group_id("sg-1")
            .group_name("legacy")
            .description("classic group")
            .build();

        let record = security_group_record(&sg);
        assert_eq!(record.group_id.as_deref(), Some("sg-1"));
        assert_eq!(record.group_name.as_deref(), Some("legacy"));
        assert_eq!(record.vpc_id, None);
    }

    #[test]
    fn keeps_only_group_ids_of_interface() {
        let eni = NetworkInterface::builder()
            .network_interface_id("eni-1")
            .groups(GroupIdentifier::builder().group_id("sg-a").group_name("a").build())
            .groups(GroupIdentifier::builder().group_name("no-id").build())
            .groups(GroupIdentifier::builder().group_id("sg-b").build())
            .build();

        let record = network_interface_record(&eni);
        assert_eq!(record.network_interface_id.as_deref(), Some("eni-1"));
        assert_eq!(record.group_ids, vec!["sg-a", "sg-b"]);
    }
}
