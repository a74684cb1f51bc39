//! Run loop: invoke the optimizer, harvest its epochs, persist each run.

use crate::domain::epoch::{extract_batch, RunBatch, RunHandle};
use crate::domain::error::HypermanagerError;
use crate::domain::schema::{build_schema, TableSchema};
use crate::domain::space::Space;
use crate::ports::command_port::CommandPort;
use crate::ports::results_port::ResultsPort;
use crate::ports::status_port::{StatusEvent, StatusPort};
use crate::ports::store_port::StorePort;

/// Exit status of one optimizer invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandExit {
    /// `None` when the process was terminated by a signal.
    pub code: Option<i32>,
}

impl CommandExit {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    pub fn describe(&self) -> String {
        match self.code {
            Some(code) => format!("exit code {code}"),
            None => "terminated by signal".to_string(),
        }
    }
}

/// Settings of one full `run` invocation.
#[derive(Debug, Clone)]
pub struct RunSettings {
    /// The optimizer command line, passed to the shell verbatim.
    pub command: String,
    pub iterations: u32,
    /// Destroy and recreate the store before the first run.
    pub drop_existing: bool,
    /// Keep iterating past a failed optimizer invocation and persist
    /// whatever the results artifact holds.
    pub keep_going: bool,
}

/// Wires the ports together and drives the strictly sequential run loop.
pub struct Orchestrator<'a> {
    pub command: &'a dyn CommandPort,
    pub results: &'a dyn ResultsPort,
    pub store: &'a dyn StorePort,
    pub status: &'a dyn StatusPort,
}

/// Per-iteration progression. Each state carries what the previous step
/// produced, so a cycle can neither skip a step nor reuse stale data.
enum Cycle {
    Idle,
    Invoked,
    Harvested { handle: RunHandle },
    Extracted { batch: RunBatch },
    Done { rows: usize },
}

impl Orchestrator<'_> {
    /// Run the optimizer `settings.iterations` times, writing each run's
    /// batch before the next one starts. The first failure of any stage
    /// aborts the remaining iterations.
    pub fn run(
        &self,
        settings: &RunSettings,
        spaces: &[Space],
    ) -> Result<(), HypermanagerError> {
        let schema = build_schema(spaces);

        if settings.drop_existing {
            self.store.initialize(&schema)?;
            self.status.emit(StatusEvent::StoreInitialized {
                columns: schema.columns().len(),
            });
        }

        for iteration in 0..settings.iterations {
            self.status.emit(StatusEvent::IterationStarted {
                iteration,
                total: settings.iterations,
            });
            self.run_cycle(settings, spaces, &schema, iteration)?;
        }

        Ok(())
    }

    fn run_cycle(
        &self,
        settings: &RunSettings,
        spaces: &[Space],
        schema: &TableSchema,
        iteration: u32,
    ) -> Result<(), HypermanagerError> {
        let mut cycle = Cycle::Idle;
        loop {
            cycle = match cycle {
                Cycle::Idle => {
                    let exit = self.command.invoke(&settings.command)?;
                    self.status.emit(StatusEvent::CommandCompleted {
                        iteration,
                        status: exit.describe(),
                    });
                    if !exit.success() && !settings.keep_going {
                        return Err(HypermanagerError::CommandFailed {
                            status: exit.describe(),
                        });
                    }
                    Cycle::Invoked
                }
                Cycle::Invoked => {
                    let handle = RunHandle::new(self.results.load_epochs()?);
                    self.status.emit(StatusEvent::EpochsHarvested {
                        iteration,
                        epochs: handle.epoch_count(),
                    });
                    Cycle::Harvested { handle }
                }
                Cycle::Harvested { handle } => Cycle::Extracted {
                    batch: extract_batch(&handle, iteration, spaces)?,
                },
                Cycle::Extracted { batch } => {
                    self.store.write_batch(schema, &batch)?;
                    Cycle::Done { rows: batch.len() }
                }
                Cycle::Done { rows } => {
                    self.status.emit(StatusEvent::BatchWritten { iteration, rows });
                    return Ok(());
                }
            };
        }
    }
}
