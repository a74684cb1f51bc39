//! Shell subprocess adapter for the optimizer command.

use crate::domain::error::HypermanagerError;
use crate::domain::orchestrator::CommandExit;
use crate::ports::command_port::CommandPort;
use std::process::Command;

/// Runs optimizer commands through `sh -c`, blocking until they finish.
///
/// The command string reaches the shell verbatim; the caller owns whatever
/// metacharacters it contains.
pub struct ShellCommandAdapter;

impl CommandPort for ShellCommandAdapter {
    fn invoke(&self, command: &str) -> Result<CommandExit, HypermanagerError> {
        let status = Command::new("sh").arg("-c").arg(command).status()?;
        Ok(CommandExit {
            code: status.code(),
        })
    }
}
