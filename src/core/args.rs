//! Command-line partitioning.
//!
//! Splits the positional tokens into role, variable names and the command to
//! exec, e.g. `api DB_URL API_KEY -- ./server --port 80`.

use crate::core::constants::SEPARATOR;
use crate::core::types::{Role, VarName};
use crate::error::{Result, UsageError};

/// A partitioned invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Role namespacing every secret path.
    pub role: Role,
    /// Variables to resolve, in command-line order.
    pub vars: Vec<VarName>,
    /// Command and arguments after the separator.
    ///
    /// `None` when no separator was given, `Some(vec![])` when the separator
    /// was the last token.
    pub command: Option<Vec<String>>,
}

/// Partition positional tokens at the first `--`.
///
/// # Errors
///
/// Returns `UsageError::MissingRole` if `tokens` is empty.
pub fn partition(tokens: &[String]) -> Result<Invocation> {
    let (role, rest) = tokens.split_first().ok_or(UsageError::MissingRole)?;

    let (vars, command) = match rest.iter().position(|t| t == SEPARATOR) {
        Some(idx) => (&rest[..idx], Some(rest[idx + 1..].to_vec())),
        None => (rest, None),
    };

    Ok(Invocation {
        role: role.clone(),
        vars: vars.to_vec(),
        command,
    })
}

impl Invocation {
    /// The command to exec, or a usage error when none was given.
    pub fn require_command(&self) -> Result<&[String]> {
        match self.command.as_deref() {
            Some(command) if !command.is_empty() => Ok(command),
            _ => Err(UsageError::MissingCommand.into()),
        }
    }
}
