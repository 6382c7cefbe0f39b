//! Runtime configuration.
//!
//! Built once at startup from command-line flags (which fall back to
//! environment variables) and passed down to the clients.

use tracing::debug;
use url::Url;

use crate::core::constants;
use crate::error::{ConfigError, Result};

/// Settings for a single run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Vault base address, without a trailing slash.
    pub vault_addr: String,
    /// Metadata service base address, without a trailing slash.
    pub metadata_addr: String,
    /// Nonce sent with the login request, if any.
    pub nonce: Option<String>,
    /// Abort when any secret fails to resolve.
    pub strict: bool,
    vault: Url,
}

impl Config {
    /// Build a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidAddress` if either address is not an
    /// absolute `http` or `https` URL.
    pub fn new(
        vault_addr: &str,
        metadata_addr: &str,
        nonce: Option<String>,
        strict: bool,
    ) -> Result<Self> {
        let vault = parse_addr("vault", vault_addr)?;
        parse_addr("metadata", metadata_addr)?;

        let config = Self {
            vault_addr: vault_addr.trim_end_matches('/').to_string(),
            metadata_addr: metadata_addr.trim_end_matches('/').to_string(),
            nonce: nonce.filter(|n| !n.is_empty()),
            strict,
            vault,
        };

        debug!(
            vault = %config.vault_addr,
            metadata = %config.metadata_addr,
            nonce = config.nonce.is_some(),
            strict,
            "config loaded"
        );

        Ok(config)
    }

    /// Full URL of a Vault endpoint.
    pub fn vault_url(&self, path: &str) -> String {
        join(&self.vault_addr, path)
    }

    /// URL of the secret backing `name` under `role`.
    ///
    /// `role` and `name` are each pushed as one percent-encoded path
    /// segment, so `/`, `?` and `#` cannot change which secret is read.
    pub fn secret_url(&self, role: &str, name: &str) -> Url {
        let mut url = self.vault.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(constants::SECRET_PATH.split('/'))
                .push(role)
                .push(name);
        }
        url
    }

    /// Full URL of a metadata endpoint.
    pub fn metadata_url(&self, path: &str) -> String {
        join(&self.metadata_addr, path)
    }
}

fn join(base: &str, path: &str) -> String {
    format!("{}/{}", base, path.trim_start_matches('/'))
}

fn parse_addr(field: &'static str, value: &str) -> Result<Url> {
    let invalid = |reason: String| ConfigError::InvalidAddress {
        field,
        value: value.to_string(),
        reason,
    };

    let url = Url::parse(value).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())).into());
    }
    if url.host_str().is_none() {
        return Err(invalid("missing host".to_string()).into());
    }

    Ok(url)
}
