//! AWS test utilities
//!
//! Provides region detection for the ignored integration tests that talk to
//! a real account.

/// Get the AWS region for tests.
///
/// Checks environment variables in order:
/// 1. AWS_REGION
/// 2. AWS_DEFAULT_REGION
/// 3. Falls back to us-east-1
///
/// # Example
///
/// ```
/// use aws_orphans_test_utils::aws::get_test_region;
///
/// let region = get_test_region();
/// assert!(!region.is_empty());
/// ```
pub fn get_test_region() -> String {
    std::env::var("AWS_REGION")
        .or_else(|_| std::env::var("AWS_DEFAULT_REGION"))
        .unwrap_or_else(|_| "us-east-1".to_string())
}

/// Whether the environment looks like it has AWS credentials configured.
///
/// Ignored tests use this to bail out early with a clear message instead of
/// failing deep inside the SDK.
pub fn has_aws_credentials() -> bool {
    ["AWS_ACCESS_KEY_ID", "AWS_PROFILE", "AWS_WEB_IDENTITY_TOKEN_FILE"]
        .iter()
        .any(|var| std::env::var(var).is_ok_and(|v| !v.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_test_region_default() {
        let saved_region = std::env::var("AWS_REGION").ok();
        let saved_default = std::env::var("AWS_DEFAULT_REGION").ok();

        // SAFETY: env mutation is confined to this test and restored below.
        unsafe {
            std::env::remove_var("AWS_REGION");
            std::env::remove_var("AWS_DEFAULT_REGION");
        }

        assert_eq!(get_test_region(), "us-east-1");

        unsafe {
            if let Some(r) = saved_region {
                std::env::set_var("AWS_REGION", r);
            }
            if let Some(r) = saved_default {
                std::env::set_var("AWS_DEFAULT_REGION", r);
            }
        }
    }
}
