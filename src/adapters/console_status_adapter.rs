//! Stderr status reporting.

use crate::ports::status_port::{StatusEvent, StatusPort};

/// Renders orchestrator progress to stderr, keeping stdout free for the
/// optimizer's own output.
pub struct ConsoleStatusAdapter;

impl StatusPort for ConsoleStatusAdapter {
    fn emit(&self, event: StatusEvent) {
        match event {
            StatusEvent::StoreInitialized { columns } => {
                eprintln!("Store initialized ({columns} columns)");
            }
            StatusEvent::IterationStarted { iteration, total } => {
                eprintln!("Iteration {}/{}", iteration + 1, total);
            }
            StatusEvent::CommandCompleted { status, .. } => {
                eprintln!("  optimizer finished: {status}");
            }
            StatusEvent::EpochsHarvested { epochs, .. } => {
                eprintln!("  {epochs} epochs harvested");
            }
            StatusEvent::BatchWritten { rows, .. } => {
                eprintln!("  {rows} rows written");
            }
        }
    }
}
