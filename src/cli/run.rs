//! Run command.
//!
//! Partitions the command line, authenticates, resolves every requested
//! variable, then either execs the target or writes a sources file.

use std::future::Future;
use std::path::PathBuf;
use tracing::debug;

use crate::cli::{output, Cli};
use crate::core::args::partition;
use crate::core::bootstrap::fetch_environment;
use crate::core::config::Config;
use crate::core::launcher::Target;
use crate::core::validation::{validate_role, validate_var_name};
use crate::error::Result;

/// Where the resolved environment goes.
enum Destination {
    Exec(Target),
    Sources(PathBuf),
}

/// Run a full bootstrap from parsed arguments.
pub fn execute(cli: Cli) -> Result<()> {
    let config = Config::new(&cli.vault_addr, &cli.metadata_addr, cli.nonce, cli.strict)?;

    let invocation = partition(&cli.args)?;
    validate_role(&invocation.role)?;
    for name in &invocation.vars {
        validate_var_name(name)?;
    }

    // Resolve the target before any network call so a typo costs nothing.
    let destination = match cli.sources {
        Some(path) => {
            if invocation.command.is_some() {
                debug!("sources mode, ignoring command");
            }
            Destination::Sources(path)
        }
        None => Destination::Exec(Target::resolve(invocation.require_command()?)?),
    };

    let env = block_on(fetch_environment(&config, &invocation))??;

    match destination {
        Destination::Sources(path) => {
            env.write_sources(&path)?;
            output::success(&format!(
                "wrote {} secrets to {}",
                env.len(),
                path.display()
            ));
            Ok(())
        }
        Destination::Exec(target) => match target.exec(env)? {},
    }
}

/// Drive a future to completion on a fresh current-thread runtime.
///
/// The runtime is dropped before returning, so no I/O is in flight at exec.
fn block_on<F: Future>(future: F) -> Result<F::Output> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    Ok(rt.block_on(future))
}
