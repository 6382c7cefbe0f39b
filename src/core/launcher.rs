//! Target process launch.
//!
//! The target is located on `PATH` before any secret is fetched. Once the
//! environment is complete, the current process image is replaced with it.

use std::convert::Infallible;
use std::path::PathBuf;
use std::process::Command;
use tracing::debug;

use crate::core::env::Environment;
use crate::error::{LaunchError, Result};

/// A resolved command ready to exec.
#[derive(Debug)]
pub struct Target {
    /// Command name as given on the command line.
    name: String,
    /// Absolute or relative path found for `name`.
    program: PathBuf,
    args: Vec<String>,
}

impl Target {
    /// Locate `command[0]` on the executable search path.
    ///
    /// # Errors
    ///
    /// Returns `LaunchError::NotFound` if the program cannot be found or is
    /// not executable, or if `command` is empty.
    pub fn resolve(command: &[String]) -> Result<Self> {
        let (name, args) = command.split_first().ok_or_else(|| LaunchError::NotFound {
            command: String::new(),
            source: which::Error::CannotFindBinaryPath,
        })?;

        let program = which::which(name).map_err(|source| LaunchError::NotFound {
            command: name.clone(),
            source,
        })?;
        debug!(command = %name, program = %program.display(), "resolved target");

        Ok(Self {
            name: name.clone(),
            program,
            args: args.to_vec(),
        })
    }

    /// Path the program was found at.
    pub fn program(&self) -> &std::path::Path {
        &self.program
    }

    /// Build the command with `env` layered over the inherited environment.
    pub fn command(&self, env: &Environment) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args).envs(env.iter());

        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            cmd.arg0(&self.name);
        }

        cmd
    }

    /// Replace the current process with the target.
    ///
    /// Only returns on failure. On platforms without `exec`, the target is
    /// run as a child and this process exits with its status code.
    pub fn exec(self, env: Environment) -> Result<Infallible> {
        let cmd = self.command(&env);
        drop(env);

        debug!(program = %self.program.display(), "exec");
        let source = replace_process(cmd);

        Err(LaunchError::Exec {
            command: self.name,
            source,
        }
        .into())
    }
}

#[cfg(unix)]
fn replace_process(mut cmd: Command) -> std::io::Error {
    use std::os::unix::process::CommandExt;
    cmd.exec()
}

#[cfg(not(unix))]
fn replace_process(mut cmd: Command) -> std::io::Error {
    match cmd.status() {
        Ok(status) => std::process::exit(status.code().unwrap_or(1)),
        Err(e) => e,
    }
}
