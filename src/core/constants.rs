//! Constants used throughout secret-bootstrap.
//!
//! Centralizes endpoint paths, defaults and environment variable names.

/// Token separating variable names from the command to run.
pub const SEPARATOR: &str = "--";

/// Default Vault address.
pub const DEFAULT_VAULT_ADDR: &str = "http://vault.segment.local";

/// Default instance metadata service address.
pub const DEFAULT_METADATA_ADDR: &str = "http://169.254.169.254";

/// Environment variable overriding the Vault address.
pub const VAULT_ADDR_ENV: &str = "VAULT_ADDR";

/// Environment variable overriding the metadata service address.
pub const METADATA_ADDR_ENV: &str = "EC2_METADATA_ADDR";

/// Environment variable supplying the login nonce.
pub const NONCE_ENV: &str = "SECRET_BOOTSTRAP_NONCE";

/// Environment variable holding the tracing filter.
pub const LOG_ENV: &str = "SECRET_BOOTSTRAP_LOG";

/// Signed identity document (PKCS#7), relative to the metadata address.
pub const IDENTITY_PATH: &str = "latest/dynamic/instance-identity/pkcs7";

/// Instance profile info, relative to the metadata address.
pub const IAM_INFO_PATH: &str = "latest/meta-data/iam/info";

/// AWS auth login endpoint, relative to the Vault address.
pub const LOGIN_PATH: &str = "v1/auth/aws/login";

/// Prefix of secret reads, relative to the Vault address.
pub const SECRET_PATH: &str = "v1/secret";

/// Header carrying the Vault access token.
pub const TOKEN_HEADER: &str = "X-Vault-Token";

/// Usage line printed on command-line errors.
pub const USAGE: &str = "secret-bootstrap [OPTIONS] <role> [var...] -- <command> [args...]";
