//! Concurrent secret resolution.
//!
//! Every requested variable is fetched concurrently with the shared token.
//! The fetches are joined before anything is returned, so callers never see
//! a partial environment.

use futures::future::join_all;
use std::future::Future;
use tracing::{debug, warn};
use zeroize::Zeroizing;

use crate::core::env::Environment;
use crate::core::types::{SecretValue, VarName};
use crate::error::{FetchError, Result};

/// A store that can read one secret for a role.
pub trait SecretSource {
    /// Read the secret backing `name` under `role`.
    fn read_secret(
        &self,
        token: &str,
        role: &str,
        name: &str,
    ) -> impl Future<Output = std::result::Result<SecretValue, FetchError>>;
}

/// What to do when a single variable cannot be fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Log the failure and set the variable to an empty string.
    Empty,
    /// Fail the whole run.
    Abort,
}

impl FailurePolicy {
    /// Map the `--strict` flag to a policy.
    pub fn from_strict(strict: bool) -> Self {
        if strict {
            Self::Abort
        } else {
            Self::Empty
        }
    }
}

/// Fetch every variable concurrently and collect the results.
///
/// With [`FailurePolicy::Empty`] the returned environment always holds one
/// entry per distinct name; failed fetches map to `""`.
///
/// # Errors
///
/// With [`FailurePolicy::Abort`], returns `FetchError::Variable` for the
/// first failed variable in command-line order, after all fetches finished.
pub async fn resolve<S: SecretSource>(
    source: &S,
    token: &str,
    role: &str,
    vars: &[VarName],
    policy: FailurePolicy,
) -> Result<Environment> {
    debug!(role, count = vars.len(), "resolving secrets");

    let fetches = vars.iter().map(|name| async move {
        let result = source.read_secret(token, role, name).await;
        (name, result)
    });
    let results = join_all(fetches).await;

    let mut env = Environment::new();
    let mut first_failure = None;

    for (name, result) in results {
        match result {
            Ok(value) => env.insert(name.clone(), value),
            Err(e) => {
                warn!(var = %name, error = %e, "could not fetch secret, setting it empty");
                env.insert(name.clone(), Zeroizing::new(String::new()));
                if first_failure.is_none() {
                    first_failure = Some((name, e));
                }
            }
        }
    }

    if let (FailurePolicy::Abort, Some((name, e))) = (policy, first_failure) {
        return Err(FetchError::Variable {
            name: name.clone(),
            source: Box::new(e),
        }
        .into());
    }

    debug!(resolved = env.len(), "secrets resolved");
    Ok(env)
}
