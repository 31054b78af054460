//! Elastic IP listing

use super::Ec2Client;
use anyhow::{Context, Result};
use aws_orphans_common::AddressRecord;
use aws_sdk_ec2::types::Address;
use tracing::debug;

impl Ec2Client {
    /// List every Elastic IP in the region.
    ///
    /// DescribeAddresses is not paginated; one call returns everything.
    pub async fn list_addresses(&self) -> Result<Vec<AddressRecord>> {
        let response = self
            .client
            .describe_addresses()
            .send()
            .await
            .context("Failed to describe addresses")?;

        let addresses: Vec<_> = response.addresses().iter().map(address_record).collect();

        debug!(region = %self.region(), count = addresses.len(), "Listed Elastic IPs");
        Ok(addresses)
    }
}

fn address_record(address: &Address) -> AddressRecord {
    AddressRecord {
        allocation_id: address.allocation_id().map(str::to_string),
        public_ip: address.public_ip().map(str::to_string),
        domain: address.domain().map(|d| d.as_str().to_string()),
        association_id: address.association_id().map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_ec2::types::DomainType;

    #[test]
    fn converts_associated_address() {
        let address = Address::builder()
            .allocation_id("eipalloc-1")
            .public_ip("203.0.113.7")
            .domain(DomainType::Vpc)
            .association_id("eipassoc-1")
            .build();

        let record = address_record(&address);
        assert_eq!(record.allocation_id.as_deref(), Some("eipalloc-1"));
        assert_eq!(record.domain.as_deref(), Some("vpc"));
        assert_eq!(record.association_id.as_deref(), Some("eipassoc-1"));
    }

    #[test]
    fn missing_domain_stays_absent() {
        let record = address_record(&Address::builder().public_ip("198.51.100.1").build());
        assert_eq!(record.domain, None);
        assert_eq!(record.association_id, None);
    }
}
