//! Optimizer invocation port trait.

use crate::domain::error::HypermanagerError;
use crate::domain::orchestrator::CommandExit;

pub trait CommandPort {
    /// Run `command` to completion, blocking until it returns.
    fn invoke(&self, command: &str) -> Result<CommandExit, HypermanagerError>;
}
