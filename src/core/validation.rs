//! Input validation for roles and variable names.
//!
//! Both end up as segments of a secret path, so neither may name a
//! directory or carry URL delimiters.

use crate::error::{Result, UsageError};

/// Validate a variable name.
///
/// Names are case-sensitive and otherwise free-form, but they must be
/// settable as environment variables:
/// - Cannot be empty
/// - Cannot contain `=`
/// - Cannot contain a NUL byte
/// - Cannot be `.` or `..`, or contain `/`, `?` or `#`
///
/// # Errors
///
/// Returns `UsageError::InvalidVariable` if the name is invalid.
pub fn validate_var_name(name: &str) -> Result<()> {
    let reason = if name.contains('=') {
        "cannot contain '='"
    } else if let Some(reason) = segment_problem(name) {
        reason
    } else {
        return Ok(());
    };

    Err(UsageError::InvalidVariable {
        name: name.to_string(),
        reason,
    }
    .into())
}

/// Validate the role given on the command line.
///
/// A leading `-` almost always means a mistyped option that ended up in the
/// role position.
///
/// # Errors
///
/// Returns `UsageError::InvalidRole` if the role is invalid.
pub fn validate_role(role: &str) -> Result<()> {
    let reason = if role.starts_with('-') {
        "cannot start with '-' (options must come before the role)"
    } else if let Some(reason) = segment_problem(role) {
        reason
    } else {
        return Ok(());
    };

    Err(UsageError::InvalidRole {
        role: role.to_string(),
        reason,
    }
    .into())
}

fn segment_problem(segment: &str) -> Option<&'static str> {
    if segment.is_empty() {
        Some("cannot be empty")
    } else if segment == "." || segment == ".." {
        Some("cannot be '.' or '..'")
    } else if segment.contains(['/', '?', '#']) {
        Some("cannot contain '/', '?' or '#'")
    } else if segment.contains('\0') {
        Some("cannot contain a NUL byte")
    } else {
        None
    }
}
