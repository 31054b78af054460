//! EC2 inventory listings
//!
//! Each listing walks every page of the provider call and converts SDK types
//! into the typed raw records of `aws_orphans_common::inventory`.

mod address;
mod security_group;
mod volume;

use crate::aws::context::{AwsContext, FromAwsContext};
use anyhow::Result;
use aws_orphans_common::{AddressRecord, NetworkInterfaceRecord, SecurityGroupRecord, VolumeRecord};
use aws_sdk_ec2::Client;
use std::future::Future;

/// EC2 client bound to one region
pub struct Ec2Client {
    pub(crate) client: Client,
    region: String,
}

impl FromAwsContext for Ec2Client {
    fn from_context(ctx: &AwsContext) -> Self {
        Self {
            client: ctx.ec2_client(),
            region: ctx.region().to_string(),
        }
    }
}

impl Ec2Client {
    pub fn region(&self) -> &str {
        &self.region
    }
}

/// Read-only inventory calls the region scan needs.
///
/// Abstracts the EC2 client so orchestration can be tested without hitting
/// real AWS. Every method returns the fully materialized listing; errors are
/// returned unchanged for the region orchestrator to classify.
#[allow(async_fn_in_trait)] // Internal use only, Send+Sync bounds on trait are sufficient
#[cfg_attr(test, mockall::automock)]
pub trait Ec2Inventory: Send + Sync {
    /// All security groups in the region
    async fn describe_security_groups(&self) -> Result<Vec<SecurityGroupRecord>>;

    /// All network interfaces with their attached group ids
    async fn describe_network_interfaces(&self) -> Result<Vec<NetworkInterfaceRecord>>;

    /// All Elastic IPs
    async fn describe_addresses(&self) -> Result<Vec<AddressRecord>>;

    /// Volumes in the `available` state only
    async fn describe_available_volumes(&self) -> Result<Vec<VolumeRecord>>;
}

impl Ec2Inventory for Ec2Client {
    async fn describe_security_groups(&self) -> Result<Vec<SecurityGroupRecord>> {
        Ec2Client::list_security_groups(self).await
    }

    async fn describe_network_interfaces(&self) -> Result<Vec<NetworkInterfaceRecord>> {
        Ec2Client::list_network_interfaces(self).await
    }

    async fn describe_addresses(&self) -> Result<Vec<AddressRecord>> {
        Ec2Client::list_addresses(self).await
    }

    async fn describe_available_volumes(&self) -> Result<Vec<VolumeRecord>> {
        Ec2Client::list_available_volumes(self).await
    }
}

/// Next page token, treating an empty token as the last page.
fn next_page(token: Option<&str>) -> Option<String> {
    token.filter(|t| !t.is_empty()).map(str::to_string)
}

/// Drive a `NextToken` listing to completion.
///
/// `fetch` receives the token for the page to request (`None` for the first
/// page) and returns that page's items with the token the provider sent back.
/// Pages are concatenated in the order they arrive; the first error aborts
/// the listing.
async fn collect_pages<T, F, Fut>(mut fetch: F) -> Result<Vec<T>>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<(Vec<T>, Option<String>)>>,
{
    let mut items = Vec::new();
    let mut next_token: Option<String> = None;

    loop {
        let (page, token) = fetch(next_token.take()).await?;
        items.extend(page);

        match next_page(token.as_deref()) {
            Some(token) => next_token = Some(token),
            None => break,
        }
    }

    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    type Page = (Vec<&'static str>, Option<String>);

    /// Serve `pages` in order, recording the token each request carried.
    async fn replay(pages: Vec<Page>) -> (Result<Vec<&'static str>>, Vec<Option<String>>) {
        let mut requested = Vec::new();
        let mut pages = pages.into_iter();
        let result = collect_pages(|token| {
            requested.push(token);
            let page = pages.next();
            async move { page.ok_or_else(|| anyhow::anyhow!("page requested past the last one")) }
        })
        .await;
        (result, requested)
    }

    #[tokio::test]
    async fn collects_every_page_in_order() {
        let (items, requested) = replay(vec![
            (vec!["sg-1", "sg-2"], Some("t1".to_string())),
            (vec!["sg-3"], None),
        ])
        .await;

        assert_eq!(items.unwrap(), vec!["sg-1", "sg-2", "sg-3"]);
        assert_eq!(requested, vec![None, Some("t1".to_string())]);
    }

    #[tokio::test]
    async fn single_page_issues_one_request() {
        let (items, requested) = replay(vec![(vec!["vol-1"], None)]).await;

        assert_eq!(items.unwrap(), vec!["vol-1"]);
        assert_eq!(requested, vec![None]);
    }

    #[tokio::test]
    async fn empty_token_is_the_last_page() {
        let (items, requested) = replay(vec![
            (vec![], Some("t1".to_string())),
            (vec!["eni-1"], Some(String::new())),
        ])
        .await;

        assert_eq!(items.unwrap(), vec!["eni-1"]);
        assert_eq!(requested.len(), 2);
    }

    #[tokio::test]
    async fn error_on_later_page_discards_partial_listing() {
        let mut calls = 0;
        let result: Result<Vec<&str>> = collect_pages(|_token| {
            calls += 1;
            let call = calls;
            async move {
                if call == 1 {
                    Ok((vec!["sg-1"], Some("t1".to_string())))
                } else {
                    Err(anyhow::anyhow!("RequestLimitExceeded"))
                }
            }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(calls, 2);
    }

    #[test]
    fn empty_token_ends_pagination() {
        assert_eq!(next_page(None), None);
        assert_eq!(next_page(Some("")), None);
        assert_eq!(next_page(Some("abc")).as_deref(), Some("abc"));
    }
}
