//! AWS client modules
//!
//! This module provides wrappers around AWS SDK clients for:
//! - EC2: Security group, network interface, address and volume listings
//! - STS: Account ID lookup for the credential preflight

pub mod account;
pub mod context;
pub mod ec2;
pub mod error;

pub use account::{AccountId, get_current_account_id};
pub use context::{AwsContext, FromAwsContext};
pub use ec2::{Ec2Client, Ec2Inventory};
pub use error::{AwsError, classify_anyhow_error, classify_aws_error};
