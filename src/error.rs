//! Error types for secret-bootstrap.
//!
//! Each phase of a run has its own error enum; they all fold into [`Error`].

use thiserror::Error;

/// Top-level error returned by every fallible operation.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Usage(#[from] UsageError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Launch(#[from] LaunchError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Command-line shape errors.
#[derive(Error, Debug)]
pub enum UsageError {
    #[error("missing role")]
    MissingRole,

    #[error("missing command: separate it from the variable names with `--`")]
    MissingCommand,

    #[error("invalid role '{role}': {reason}")]
    InvalidRole { role: String, reason: &'static str },

    #[error("invalid variable name '{name}': {reason}")]
    InvalidVariable { name: String, reason: &'static str },
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid {field} address '{value}': {reason}")]
    InvalidAddress {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("could not build http client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

/// Authentication-phase errors. All of them are fatal.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("could not fetch identity document: {0}")]
    Identity(#[source] reqwest::Error),

    #[error("could not fetch instance profile: {0}")]
    Profile(#[source] reqwest::Error),

    #[error("could not parse instance profile arn '{0}'")]
    ProfileArn(String),

    #[error("vault login failed: {0}")]
    Login(#[source] reqwest::Error),

    #[error("vault login rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("vault login response did not contain a client token")]
    MissingToken,
}

/// Errors fetching a single secret.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("vault returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("could not decode vault response: {0}")]
    Decode(#[source] reqwest::Error),

    #[error("no secret found in vault response")]
    Empty,

    #[error("could not fetch secret {name}: {source}")]
    Variable {
        name: String,
        #[source]
        source: Box<FetchError>,
    },
}

/// Errors resolving or replacing the target process.
#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("command not found: {command}")]
    NotFound {
        command: String,
        #[source]
        source: which::Error,
    },

    #[error("could not exec {command}: {source}")]
    Exec {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
