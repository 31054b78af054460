//! aws-orphans-common - Shared types and pure logic
//!
//! This crate holds everything about an orphan scan that does not need the
//! AWS SDK, so the reconciliation rules can be tested without network access.
//!
//! ## Modules
//!
//! - [`console`]: EC2 console deep links per resource kind
//! - [`defaults`]: Default scan settings
//! - [`inventory`]: Typed raw records as returned by the provider listings
//! - [`outcome`]: Per-region and fleet-wide scan outcomes
//! - [`reconcile`]: Orphan detection over raw listings
//! - [`records`]: Orphaned resource records handed to storage and reports
//! - [`regions`]: The fixed region catalog and subset filtering
//! - [`resource_kind`]: The scannable resource kinds

pub mod console;
pub mod defaults;
pub mod inventory;
pub mod outcome;
pub mod reconcile;
pub mod records;
pub mod regions;
pub mod resource_kind;

// Re-export commonly used types
pub use inventory::{AddressRecord, NetworkInterfaceRecord, SecurityGroupRecord, VolumeRecord};
pub use outcome::{FailureKind, FleetOutcome, RegionOutcome, ScanFailure};
pub use records::{OrphanedElasticIp, OrphanedResource, OrphanedSecurityGroup, UnattachedVolume};
pub use regions::RegionCatalog;
pub use resource_kind::ResourceKind;
