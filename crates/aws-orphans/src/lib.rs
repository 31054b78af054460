//! aws-orphans: multi-region scanner for unused AWS resources
//!
//! Finds security groups not bound to any network interface, Elastic IPs
//! without an association and EBS volumes in the `available` state, region by
//! region, isolating per-region failures so one bad region never aborts a scan.
//!
//! ## Modules
//!
//! - [`aws`]: Credential loading, the EC2 inventory accessor and error classification
//! - [`config`]: Scan settings and configuration errors
//! - [`report`]: Table and JSON rendering of scan outcomes and stored rows
//! - [`scanner`]: Region and fleet scan orchestrators
//! - [`state`]: SQLite persistence of the latest scan per resource kind

pub mod aws;
pub mod config;
pub mod report;
pub mod scanner;
pub mod state;
