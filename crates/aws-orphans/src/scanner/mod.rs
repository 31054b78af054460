//! Region and fleet scan orchestration
//!
//! The region orchestrator runs one region's inventory + reconcile pipeline
//! and turns every failure into a `RegionOutcome::Failure`. The fleet
//! orchestrator fans that out over the filtered region catalog with bounded
//! concurrency and returns outcomes in catalog order.

mod factory;
mod fleet;
mod region;

pub use factory::{InventoryFactory, SdkInventoryFactory};
pub use fleet::scan_fleet;
pub use region::{find_orphans, scan_region};
