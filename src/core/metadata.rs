//! Instance metadata client.
//!
//! Fetches the signed identity document and the instance profile the host
//! runs under. Both feed the Vault AWS login.

use serde::Deserialize;
use tracing::{debug, trace};

use crate::core::config::Config;
use crate::core::constants;
use crate::core::types::Role;
use crate::error::{AuthError, Result};

/// Instance profile info as returned by the metadata service.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct InstanceProfile {
    #[serde(default)]
    instance_profile_arn: String,
}

/// Client for the instance metadata service.
pub struct Metadata {
    http: reqwest::Client,
    identity_url: String,
    iam_info_url: String,
}

impl Metadata {
    /// Create a metadata client from the configured address.
    pub fn new(http: reqwest::Client, config: &Config) -> Self {
        Self {
            http,
            identity_url: config.metadata_url(constants::IDENTITY_PATH),
            iam_info_url: config.metadata_url(constants::IAM_INFO_PATH),
        }
    }

    /// Fetch the PKCS#7 identity document as a single line.
    ///
    /// The service wraps the document across several lines; every newline is
    /// removed.
    pub async fn identity_document(&self) -> Result<String> {
        debug!(url = %self.identity_url, "fetching identity document");

        let body = self
            .http
            .get(&self.identity_url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(AuthError::Identity)?
            .text()
            .await
            .map_err(AuthError::Identity)?;

        trace!(len = body.len(), "identity document fetched");
        Ok(body.replace('\n', ""))
    }

    /// Fetch the instance profile and derive the login role from its ARN.
    pub async fn instance_role(&self) -> Result<Role> {
        debug!(url = %self.iam_info_url, "fetching instance profile");

        let profile: InstanceProfile = self
            .http
            .get(&self.iam_info_url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(AuthError::Profile)?
            .json()
            .await
            .map_err(AuthError::Profile)?;

        role_from_arn(&profile.instance_profile_arn)
    }
}

/// Extract the role name from an instance profile ARN.
///
/// `arn:aws:iam::123456789012:instance-profile/api` yields `api`. The ARN
/// must split on `/` into exactly two non-empty segments.
///
/// # Errors
///
/// Returns `AuthError::ProfileArn` naming the ARN otherwise.
pub fn role_from_arn(arn: &str) -> Result<Role> {
    let mut parts = arn.split('/');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(prefix), Some(role), None) if !prefix.is_empty() && !role.is_empty() => {
            Ok(role.to_string())
        }
        _ => Err(AuthError::ProfileArn(arn.to_string()).into()),
    }
}
