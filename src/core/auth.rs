//! Vault authentication.
//!
//! Trades the host's identity document and instance-profile role for a
//! client token. Any failure here is fatal to the run.

use tracing::debug;

use crate::core::metadata::Metadata;
use crate::core::types::Token;
use crate::core::vault::Vault;
use crate::error::Result;

/// Obtain the access token for this run.
///
/// `nonce` is forwarded to the login request when set; otherwise Vault
/// generates one for the instance.
///
/// # Errors
///
/// Returns `AuthError` if the identity document, the instance profile, or
/// the login cannot be obtained.
pub async fn authenticate(
    metadata: &Metadata,
    vault: &Vault,
    nonce: Option<&str>,
) -> Result<Token> {
    let pkcs7 = metadata.identity_document().await?;
    let role = metadata.instance_role().await?;
    debug!(role = %role, "authenticating");

    vault.login(&role, &pkcs7, nonce).await
}
