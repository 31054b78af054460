//! AWS error classification
//!
//! Maps provider errors onto the small set of failure kinds a region outcome
//! reports, using the error code from `ProvideErrorMetadata` rather than
//! string matching wherever the SDK gives us a typed error.

use aws_orphans_common::FailureKind;
use aws_sdk_ec2::error::{ProvideErrorMetadata, SdkError};
use aws_sdk_ec2::operation::describe_addresses::DescribeAddressesError;
use aws_sdk_ec2::operation::describe_network_interfaces::DescribeNetworkInterfacesError;
use aws_sdk_ec2::operation::describe_security_groups::DescribeSecurityGroupsError;
use aws_sdk_ec2::operation::describe_volumes::DescribeVolumesError;
use aws_sdk_sts::operation::get_caller_identity::GetCallerIdentityError;
use thiserror::Error;

/// AWS error categories relevant to a read-only scan
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AwsError {
    /// Rate limited and the SDK's retries are exhausted
    #[error("Rate limit exceeded: {message}")]
    Throttled { message: String },

    /// No usable credentials, or credentials the provider rejected
    #[error("Credentials missing or rejected: {message}")]
    Credentials { message: String },

    /// Valid credentials without permission for the listing
    #[error("Access denied: {message}")]
    AccessDenied { message: String },

    /// Region not enabled for this account
    #[error("Region unavailable: {message}")]
    RegionUnavailable { message: String },

    /// Operation timeout hit inside the SDK
    #[error("Request timed out")]
    Timeout,

    /// Generic AWS SDK error with code and message
    #[error("AWS error: {message}")]
    Sdk {
        code: Option<String>,
        message: String,
    },
}

impl AwsError {
    /// The failure kind recorded in a region outcome.
    pub fn failure_kind(&self) -> FailureKind {
        match self {
            AwsError::Throttled { .. } => FailureKind::Throttled,
            AwsError::Credentials { .. } => FailureKind::Credentials,
            AwsError::AccessDenied { .. } => FailureKind::AccessDenied,
            AwsError::RegionUnavailable { .. } => FailureKind::RegionUnavailable,
            AwsError::Timeout => FailureKind::Timeout,
            AwsError::Sdk { .. } => FailureKind::Api,
        }
    }
}

/// Known AWS error codes for throttling/rate limiting
const THROTTLING_CODES: &[&str] = &[
    "Throttling",
    "ThrottlingException",
    "RequestLimitExceeded",
    "RequestThrottled",
    "TooManyRequestsException",
];

/// Known AWS error codes for missing, expired or invalid credentials
const CREDENTIAL_CODES: &[&str] = &[
    "AuthFailure",
    "InvalidClientTokenId",
    "UnrecognizedClientException",
    "ExpiredToken",
    "ExpiredTokenException",
    "SignatureDoesNotMatch",
    "MissingAuthenticationToken",
];

/// Known AWS error codes for permission problems
const ACCESS_DENIED_CODES: &[&str] = &[
    "UnauthorizedOperation",
    "AccessDenied",
    "AccessDeniedException",
];

/// Known AWS error codes for regions the account cannot use
const REGION_UNAVAILABLE_CODES: &[&str] = &["OptInRequired", "InvalidRegion"];

/// Debug-string markers of credential provider failures, which carry no code
const CREDENTIAL_MARKERS: &[&str] = &[
    "CredentialsNotLoaded",
    "no credentials",
    "ProviderError",
    "InvalidConfiguration",
];

/// Classify an AWS SDK error using the error code.
pub fn classify_aws_error(code: Option<&str>, message: Option<&str>) -> AwsError {
    let message = message.unwrap_or("Unknown error").to_string();

    match code {
        Some(c) if THROTTLING_CODES.contains(&c) => AwsError::Throttled { message },
        Some(c) if CREDENTIAL_CODES.contains(&c) => AwsError::Credentials { message },
        Some(c) if ACCESS_DENIED_CODES.contains(&c) => AwsError::AccessDenied { message },
        Some(c) if REGION_UNAVAILABLE_CODES.contains(&c) => {
            AwsError::RegionUnavailable { message }
        }
        _ => AwsError::Sdk {
            code: code.map(|s| s.to_string()),
            message,
        },
    }
}

/// Classify an error from an anyhow::Error by extracting the AWS error code.
///
/// Walks the error chain looking for the `SdkError` of any operation the
/// scanner issues. Falls back to the Debug representation when no typed error
/// is found or the typed error carries no code.
pub fn classify_anyhow_error(error: &anyhow::Error) -> AwsError {
    for cause in error.chain() {
        let classified = classify_cause::<DescribeSecurityGroupsError>(cause)
            .or_else(|| classify_cause::<DescribeNetworkInterfacesError>(cause))
            .or_else(|| classify_cause::<DescribeAddressesError>(cause))
            .or_else(|| classify_cause::<DescribeVolumesError>(cause))
            .or_else(|| classify_cause::<GetCallerIdentityError>(cause));

        if let Some(classified) = classified {
            return classified;
        }
    }

    classify_debug_string(&format!("{error:?}"), error.to_string())
}

fn classify_cause<E>(cause: &(dyn std::error::Error + 'static)) -> Option<AwsError>
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
{
    let err = cause.downcast_ref::<SdkError<E>>()?;

    if let SdkError::TimeoutError(_) = err {
        return Some(AwsError::Timeout);
    }

    let meta = ProvideErrorMetadata::meta(err);
    Some(match meta.code() {
        Some(code) => classify_aws_error(Some(code), meta.message()),
        // Dispatch and credential failures have no service error code
        None => classify_debug_string(&format!("{err:?}"), err.to_string()),
    })
}

fn classify_debug_string(debug_str: &str, message: String) -> AwsError {
    if let Some(code) = extract_error_code(debug_str) {
        return classify_aws_error(Some(&code), Some(&message));
    }

    if CREDENTIAL_MARKERS.iter().any(|m| debug_str.contains(m)) {
        return AwsError::Credentials { message };
    }

    if debug_str.contains("TimeoutError") {
        return AwsError::Timeout;
    }

    AwsError::Sdk {
        code: None,
        message,
    }
}

/// Extract an AWS error code from a debug string representation
fn extract_error_code(debug_str: &str) -> Option<String> {
    let known = THROTTLING_CODES
        .iter()
        .chain(CREDENTIAL_CODES)
        .chain(ACCESS_DENIED_CODES)
        .chain(REGION_UNAVAILABLE_CODES);

    // Longest first so "ThrottlingException" wins over "Throttling"
    let mut matches: Vec<&str> = known.filter(|c| debug_str.contains(*c)).copied().collect();
    matches.sort_by_key(|c| std::cmp::Reverse(c.len()));
    if let Some(code) = matches.first() {
        return Some((*code).to_string());
    }

    // Try to extract any code from `code: Some("...")` pattern
    if let Some(start) = debug_str.find("code: Some(\"") {
        let rest = &debug_str[start + 12..];
        if let Some(end) = rest.find('"') {
            return Some(rest[..end].to_string());
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn throttling_codes() {
        for code in THROTTLING_CODES {
            let err = classify_aws_error(Some(code), Some("slow down"));
            assert_eq!(
                err.failure_kind(),
                FailureKind::Throttled,
                "Expected Throttled for code: {code}"
            );
        }
    }

    #[test]
    fn credential_codes() {
        for code in CREDENTIAL_CODES {
            let err = classify_aws_error(Some(code), Some("msg"));
            assert_eq!(
                err.failure_kind(),
                FailureKind::Credentials,
                "Expected Credentials for code: {code}"
            );
        }
    }

    #[test]
    fn access_denied_and_region_codes() {
        let err = classify_aws_error(Some("UnauthorizedOperation"), Some("not allowed"));
        assert_eq!(err.failure_kind(), FailureKind::AccessDenied);

        let err = classify_aws_error(Some("OptInRequired"), Some("opt in first"));
        assert_eq!(err.failure_kind(), FailureKind::RegionUnavailable);
    }

    #[test]
    fn unknown_and_missing_codes() {
        let err = classify_aws_error(Some("SomeNewError"), Some("details"));
        assert!(matches!(err, AwsError::Sdk { code: Some(_), .. }));
        assert_eq!(err.failure_kind(), FailureKind::Api);

        let err = classify_aws_error(None, None);
        assert_eq!(
            err,
            AwsError::Sdk {
                code: None,
                message: "Unknown error".to_string()
            }
        );
    }

    #[test]
    fn extract_prefers_longest_known_code() {
        let debug_str = r#"ServiceError { code: Some("ThrottlingException") }"#;
        assert_eq!(
            extract_error_code(debug_str).as_deref(),
            Some("ThrottlingException")
        );
    }

    #[test]
    fn extract_code_from_code_field() {
        let debug_str = r#"SdkError { code: Some("SomeRandomCode"), message: "fail" }"#;
        assert_eq!(
            extract_error_code(debug_str).as_deref(),
            Some("SomeRandomCode")
        );
    }

    #[test]
    fn extract_none_from_unrelated_string() {
        assert!(extract_error_code("connection refused").is_none());
    }

    #[test]
    fn untyped_anyhow_errors_fall_back_to_debug_string() {
        let err = anyhow::anyhow!("RequestLimitExceeded: too many calls")
            .context("Failed to describe volumes");
        assert!(matches!(
            classify_anyhow_error(&err),
            AwsError::Throttled { .. }
        ));

        let err = anyhow::Error::from(std::io::Error::other("connection refused"))
            .context("Failed to describe addresses");
        assert_eq!(classify_anyhow_error(&err).failure_kind(), FailureKind::Api);
    }

    #[test]
    fn credential_markers_without_code() {
        let err = anyhow::anyhow!("dispatch failure: CredentialsNotLoaded");
        assert_eq!(
            classify_anyhow_error(&err).failure_kind(),
            FailureKind::Credentials
        );
    }
}
