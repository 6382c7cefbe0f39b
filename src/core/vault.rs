//! Vault HTTP client.
//!
//! Two calls are needed: the AWS auth login, which trades an identity
//! document for a client token, and plain secret reads under
//! `secret/<role>/<name>`.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use zeroize::Zeroizing;

use crate::core::config::Config;
use crate::core::constants;
use crate::core::resolver::SecretSource;
use crate::core::types::{SecretValue, Token};
use crate::error::{AuthError, FetchError, Result};

/// Body of `POST /v1/auth/aws/login`.
#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    role: &'a str,
    pkcs7: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    nonce: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    auth: Option<LoginAuth>,
}

#[derive(Debug, Deserialize)]
struct LoginAuth {
    #[serde(default)]
    client_token: String,
}

#[derive(Debug, Deserialize)]
struct SecretResponse {
    data: Option<SecretData>,
}

#[derive(Debug, Deserialize)]
struct SecretData {
    value: Option<String>,
}

/// Vault's error envelope, `{"errors": ["..."]}`.
#[derive(Debug, Default, Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    errors: Vec<String>,
}

/// Client for the Vault HTTP API.
pub struct Vault {
    http: reqwest::Client,
    config: Config,
}

impl Vault {
    /// Create a Vault client from the configured address.
    pub fn new(http: reqwest::Client, config: &Config) -> Self {
        Self {
            http,
            config: config.clone(),
        }
    }

    /// Log in with the AWS auth method.
    ///
    /// # Errors
    ///
    /// Returns `AuthError` on transport failure, a non-success status, an
    /// undecodable body, or a response without a client token.
    pub async fn login(&self, role: &str, pkcs7: &str, nonce: Option<&str>) -> Result<Token> {
        let url = self.config.vault_url(constants::LOGIN_PATH);
        debug!(url = %url, role, "logging in to vault");

        let response = self
            .http
            .post(&url)
            .json(&LoginRequest { role, pkcs7, nonce })
            .send()
            .await
            .map_err(AuthError::Login)?;

        let status = response.status();
        if !status.is_success() {
            let message = error_message(response).await;
            return Err(AuthError::Rejected {
                status: status.as_u16(),
                message,
            }
            .into());
        }

        let body: LoginResponse = response.json().await.map_err(AuthError::Login)?;
        let token = body
            .auth
            .map(|auth| Zeroizing::new(auth.client_token))
            .filter(|token| !token.is_empty())
            .ok_or(AuthError::MissingToken)?;

        debug!("vault login succeeded");
        Ok(token)
    }
}

impl SecretSource for Vault {
    async fn read_secret(
        &self,
        token: &str,
        role: &str,
        name: &str,
    ) -> std::result::Result<SecretValue, FetchError> {
        let url = self.config.secret_url(role, name);
        debug!(url = %url, "reading secret");

        let response = self
            .http
            .get(url)
            .header(constants::TOKEN_HEADER, token)
            .send()
            .await
            .map_err(FetchError::Request)?;

        let status = response.status();
        if !status.is_success() {
            let message = error_message(response).await;
            return Err(FetchError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body: SecretResponse = response.json().await.map_err(FetchError::Decode)?;
        let value = body
            .data
            .and_then(|data| data.value)
            .filter(|value| !value.is_empty())
            .ok_or(FetchError::Empty)?;

        trace!(var = name, len = value.len(), "secret read");
        Ok(Zeroizing::new(value))
    }
}

/// Summarize a failed Vault response from its error envelope.
async fn error_message(response: reqwest::Response) -> String {
    let status = response.status();
    let body: ErrorResponse = response.json().await.unwrap_or_default();
    if body.errors.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string()
    } else {
        body.errors.join("; ")
    }
}
