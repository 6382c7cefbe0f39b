//! Type aliases for domain concepts.
//!
//! Provides semantic type aliases to make function signatures more descriptive.

use zeroize::Zeroizing;

/// A role name, namespacing secret paths (e.g., `api-service`).
pub type Role = String;

/// An environment variable name, also the last segment of its secret path.
pub type VarName = String;

/// A plaintext secret value, wiped from memory on drop.
pub type SecretValue = Zeroizing<String>;

/// A Vault client token, wiped from memory on drop.
pub type Token = Zeroizing<String>;
