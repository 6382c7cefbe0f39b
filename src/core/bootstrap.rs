//! Authenticate-then-resolve pipeline.
//!
//! Ties the metadata, Vault and resolver pieces together for one run. The
//! caller decides what happens to the returned environment.

use tracing::debug;

use crate::core::args::Invocation;
use crate::core::auth::authenticate;
use crate::core::config::Config;
use crate::core::env::Environment;
use crate::core::metadata::Metadata;
use crate::core::resolver::{resolve, FailurePolicy};
use crate::core::vault::Vault;
use crate::error::{ConfigError, Result};

const USER_AGENT: &str = concat!("secret-bootstrap/", env!("CARGO_PKG_VERSION"));

/// Build the HTTP client shared by every request in a run.
///
/// No request timeout is set: a hanging endpoint stalls the run.
pub fn http_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| ConfigError::HttpClient(e).into())
}

/// Authenticate once, then resolve every requested variable.
///
/// Nothing is fetched unless authentication succeeds.
pub async fn fetch_environment(config: &Config, invocation: &Invocation) -> Result<Environment> {
    let http = http_client()?;
    let metadata = Metadata::new(http.clone(), config);
    let vault = Vault::new(http, config);

    let token = authenticate(&metadata, &vault, config.nonce.as_deref()).await?;
    debug!(vars = invocation.vars.len(), "authenticated");

    resolve(
        &vault,
        &token,
        &invocation.role,
        &invocation.vars,
        FailurePolicy::from_strict(config.strict),
    )
    .await
}
