//! Default scan settings shared by the engine and the CLI

/// Regions scanned at the same time
pub const DEFAULT_MAX_CONCURRENCY: usize = 4;

/// Upper bound for one region's whole inventory + reconcile pipeline (seconds)
pub const DEFAULT_REGION_TIMEOUT_SECS: u64 = 120;

/// Upper bound for a single provider operation, retries included (seconds)
pub const DEFAULT_OPERATION_TIMEOUT_SECS: u64 = 30;

/// Transport-level attempts per provider operation
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Name of the security group every VPC gets and that cannot be deleted
pub const DEFAULT_SECURITY_GROUP_NAME: &str = "default";

/// Elastic IP domain assumed when the provider omits it
pub const DEFAULT_EIP_DOMAIN: &str = "vpc";

/// Volume state the provider uses for unattached volumes
pub const AVAILABLE_VOLUME_STATE: &str = "available";
