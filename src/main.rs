//! secret-bootstrap - Fetch secrets from Vault and exec a command with them.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use secret_bootstrap::cli::output;
use secret_bootstrap::cli::{execute, Cli};
use secret_bootstrap::core::constants;
use secret_bootstrap::error::Error;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // --help and --version
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            let _ = e.print();
            output::hint(&format!("usage: {}", constants::USAGE));
            std::process::exit(1);
        }
    };

    // Logs go to stderr; stdout belongs to the exec'd process.
    let filter = EnvFilter::try_from_env(constants::LOG_ENV).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("secret_bootstrap=debug")
        } else {
            EnvFilter::new("secret_bootstrap=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .init();

    if let Err(e) = execute(cli) {
        output::error(&e.to_string());
        if let Error::Usage(_) = e {
            output::hint(&format!("usage: {}", constants::USAGE));
        }
        std::process::exit(1);
    }
}
