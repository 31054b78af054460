//! Shared AWS configuration context
//!
//! Provides `AwsContext` for loading AWS SDK configuration once and
//! re-targeting it at each region of a fleet scan.

use crate::config::ScanSettings;
use aws_config::retry::RetryConfig;
use aws_config::timeout::TimeoutConfig;
use aws_config::{BehaviorVersion, Region, SdkConfig};
use std::sync::Arc;

/// Region used for account-wide calls when neither the environment nor the
/// profile names one
const FALLBACK_REGION: &str = "us-east-1";

/// Shared AWS configuration context for creating service clients.
///
/// Credentials, retry policy and timeouts are resolved once in
/// [`AwsContext::load`]; [`AwsContext::for_region`] only swaps the region.
///
/// # Example
/// ```ignore
/// let aws = AwsContext::load(None, &ScanSettings::default()).await;
///
/// let ec2 = Ec2Client::from_context(&aws.for_region("eu-west-1"));
/// ```
#[derive(Clone)]
pub struct AwsContext {
    config: Arc<SdkConfig>,
    region: String,
}

/// Construct a client from a loaded [`AwsContext`]
pub trait FromAwsContext {
    fn from_context(ctx: &AwsContext) -> Self;
}

impl AwsContext {
    /// Load AWS configuration from the environment, config files and
    /// instance roles, optionally pinned to a named profile.
    ///
    /// Every operation gets the settings' operation timeout and the SDK
    /// standard retry mode bounded by `max_attempts`.
    pub async fn load(profile: Option<&str>, settings: &ScanSettings) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .timeout_config(
                TimeoutConfig::builder()
                    .operation_timeout(settings.operation_timeout)
                    .build(),
            )
            .retry_config(RetryConfig::standard().with_max_attempts(settings.max_attempts));

        if let Some(profile) = profile {
            loader = loader.profile_name(profile);
        }

        let config = loader.load().await;
        let region = config
            .region()
            .map(|r| r.as_ref().to_string())
            .unwrap_or_else(|| FALLBACK_REGION.to_string());

        Self {
            config: Arc::new(config),
            region,
        }
    }

    /// Same credentials and policies, bound to another region.
    pub fn for_region(&self, region: &str) -> Self {
        let config = self
            .config
            .to_builder()
            .region(Region::new(region.to_string()))
            .build();

        Self {
            config: Arc::new(config),
            region: region.to_string(),
        }
    }

    /// Get the underlying SDK config for direct client construction.
    pub fn sdk_config(&self) -> &SdkConfig {
        &self.config
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn ec2_client(&self) -> aws_sdk_ec2::Client {
        aws_sdk_ec2::Client::new(self.sdk_config())
    }

    pub fn sts_client(&self) -> aws_sdk_sts::Client {
        aws_sdk_sts::Client::new(self.sdk_config())
    }
}

impl std::fmt::Debug for AwsContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsContext")
            .field("region", &self.region)
            .finish_non_exhaustive()
    }
}
