//! Command-line interface.

pub mod output;
pub mod run;

use clap::Parser;
use std::path::PathBuf;

use crate::core::constants;

/// secret-bootstrap - Fetch secrets from Vault and exec a command with them.
#[derive(Parser, Debug)]
#[command(
    name = "secret-bootstrap",
    about = "Fetch secrets from Vault and exec a command with them in its environment",
    version,
    override_usage = constants::USAGE,
    after_help = "Options must come before <role>. Everything after the first `--` is the command."
)]
pub struct Cli {
    /// Vault address
    #[arg(long, env = constants::VAULT_ADDR_ENV, default_value = constants::DEFAULT_VAULT_ADDR)]
    pub vault_addr: String,

    /// Instance metadata service address
    #[arg(long, env = constants::METADATA_ADDR_ENV, default_value = constants::DEFAULT_METADATA_ADDR)]
    pub metadata_addr: String,

    /// Nonce for the Vault AWS login (Vault generates one when unset)
    #[arg(long, env = constants::NONCE_ENV, hide_env_values = true)]
    pub nonce: Option<String>,

    /// Fail if any secret cannot be fetched instead of setting it empty
    #[arg(long)]
    pub strict: bool,

    /// Write NAME="value" lines to FILE instead of running a command
    #[arg(long, value_name = "FILE")]
    pub sources: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// <role> [var...] -- <command> [args...]
    #[arg(value_name = "ARGS", trailing_var_arg = true)]
    pub args: Vec<String>,
}

/// Execute a parsed command line.
///
/// Returns only on failure or in sources mode; a successful exec never
/// returns.
pub fn execute(cli: Cli) -> crate::error::Result<()> {
    run::execute(cli)
}
