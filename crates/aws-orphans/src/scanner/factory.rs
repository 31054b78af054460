//! Per-region inventory construction

use crate::aws::{AwsContext, Ec2Client, Ec2Inventory, FromAwsContext};
use anyhow::Result;

/// Builds the inventory accessor for one region.
///
/// Passed explicitly into the orchestrators so tests can substitute fakes and
/// each region gets its own client.
pub trait InventoryFactory: Send + Sync {
    type Inventory: Ec2Inventory;

    fn connect(&self, region: &str) -> Result<Self::Inventory>;
}

/// Factory backed by the AWS SDK, sharing one loaded credential chain
#[derive(Debug, Clone)]
pub struct SdkInventoryFactory {
    ctx: AwsContext,
}

impl SdkInventoryFactory {
    pub fn new(ctx: AwsContext) -> Self {
        Self { ctx }
    }
}

impl InventoryFactory for SdkInventoryFactory {
    type Inventory = Ec2Client;

    fn connect(&self, region: &str) -> Result<Ec2Client> {
        Ok(Ec2Client::from_context(&self.ctx.for_region(region)))
    }
}
