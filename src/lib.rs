//! secret-bootstrap - Fetch secrets from Vault at launch time and exec with them.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── output        # Terminal output helpers
//! │   └── run           # Partition, authenticate, resolve, exec
//! └── core/             # Core library components
//!     ├── args          # <role> [var...] -- <command> partitioning
//!     ├── config        # Addresses, nonce, failure policy
//!     ├── metadata      # Identity document and instance profile
//!     ├── vault         # Vault login and secret reads
//!     ├── auth          # One-time token exchange
//!     ├── resolver      # Concurrent fetch with a join barrier
//!     ├── env           # Resolved environment, sources file rendering
//!     ├── launcher      # PATH lookup and exec
//!     └── bootstrap     # Authenticate-then-resolve pipeline
//! ```
//!
//! # Flow
//!
//! 1. Split the command line into role, variable names and command.
//! 2. Locate the command on `PATH` (fails before any network call).
//! 3. Log in to Vault with the host's identity document.
//! 4. Fetch every variable concurrently; failures become empty values.
//! 5. Replace the current process with the command.

pub mod cli;
pub mod core;
pub mod error;
