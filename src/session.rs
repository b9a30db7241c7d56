// src/session.rs

//! AWS session construction and credential verification.
//!
//! Region resolution order: explicit `--region` flag, then the config value,
//! then the default provider chain (environment, profile, provider default).
//! Credentials are verified up front with a single STS `GetCallerIdentity`
//! call so failures surface before any upload work starts.

use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_credential_types::provider::error::CredentialsError;
use aws_smithy_types::error::display::DisplayErrorContext;
use tracing::{debug, info};

use crate::config::QConfig;
use crate::error::{AppError, Result};

/// An authenticated handle to the remote indexing service.
pub struct Session {
    sdk_config: SdkConfig,
}

impl Session {
    /// Resolve region and profile, then verify credentials.
    pub async fn connect(
        config: &QConfig,
        profile: &str,
        region_override: Option<String>,
    ) -> Result<Self> {
        let mut loader = aws_config::defaults(BehaviorVersion::latest()).profile_name(profile);

        if let Some(region) = region_override {
            debug!(region, "Using region from command line");
            loader = loader.region(Region::new(region));
        } else if !config.region.trim().is_empty() {
            debug!(region = %config.region, "Using region from config");
            loader = loader.region(Region::new(config.region.clone()));
        }

        let sdk_config = loader.load().await;

        let sts = aws_sdk_sts::Client::new(&sdk_config);
        match sts.get_caller_identity().send().await {
            Ok(identity) => {
                info!(
                    arn = identity.arn().unwrap_or("unknown"),
                    "Authenticated with AWS"
                );
                Ok(Self { sdk_config })
            }
            Err(e) => Err(classify_credential_error(e, profile)),
        }
    }

    /// Build a Q Business client on this session.
    pub fn qbusiness_client(&self) -> aws_sdk_qbusiness::Client {
        aws_sdk_qbusiness::Client::new(&self.sdk_config)
    }
}

/// Collapse the SDK error taxonomy into the closed set the CLI reports.
///
/// Credential resolution failures carry a typed [`CredentialsError`] somewhere
/// in the error source chain; only its text is consulted to tell a missing
/// profile apart from an empty provider chain. Errors without one (service
/// responses, transport failures) are generic client errors regardless of
/// what their messages happen to contain.
fn classify_credential_error<E>(err: E, profile: &str) -> AppError
where
    E: std::error::Error + 'static,
{
    let mut current: Option<&(dyn std::error::Error + 'static)> = Some(&err);
    while let Some(e) = current {
        if let Some(credentials) = e.downcast_ref::<CredentialsError>() {
            let message = format!("{}", DisplayErrorContext(credentials));
            return if message.to_lowercase().contains("profile") {
                AppError::ProfileNotFound(profile.to_string())
            } else {
                AppError::NoCredentials(message)
            };
        }
        current = e.source();
    }

    AppError::Client(format!("{}", DisplayErrorContext(&err)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    /// Wrapper whose `source()` yields the inner error. `io::Error::other`
    /// cannot serve this role: its `source()` skips the boxed custom error
    /// and returns *its* source, hiding the `CredentialsError` from the walk.
    #[derive(Debug)]
    struct Outer(CredentialsError);

    impl std::fmt::Display for Outer {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "outer error")
        }
    }

    impl std::error::Error for Outer {
        fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn unknown_profile_maps_to_profile_not_found() {
        let creds = CredentialsError::invalid_configuration(
            "profile `staging` was not defined in the configuration file",
        );
        let err = classify_credential_error(creds, "staging");
        assert!(matches!(err, AppError::ProfileNotFound(ref p) if p == "staging"), "got: {err}");
    }

    #[test]
    fn empty_provider_chain_maps_to_no_credentials() {
        let creds = CredentialsError::not_loaded("no providers in chain provided credentials");
        let err = classify_credential_error(creds, "default");
        assert!(matches!(err, AppError::NoCredentials(_)), "got: {err}");
    }

    #[test]
    fn credentials_error_is_found_deep_in_the_source_chain() {
        let creds = CredentialsError::not_loaded("no providers in chain provided credentials");
        let nested = io::Error::other(Outer(creds));
        let err = classify_credential_error(nested, "default");
        assert!(matches!(err, AppError::NoCredentials(_)), "got: {err}");
    }

    #[test]
    fn transport_error_mentioning_profile_stays_a_client_error() {
        let err = classify_credential_error(
            io::Error::other("connection reset while fetching https://profile.example.com"),
            "default",
        );
        assert!(matches!(err, AppError::Client(_)), "got: {err}");
    }

    #[test]
    fn service_failures_map_to_client_error() {
        let err = classify_credential_error(io::Error::other("connection reset by peer"), "default");
        assert!(matches!(err, AppError::Client(_)), "got: {err}");
    }
}
