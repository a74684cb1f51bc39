//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::console_status_adapter::ConsoleStatusAdapter;
use crate::adapters::results_file_adapter::{ResultsFileAdapter, DEFAULT_RESULTS_FILE};
use crate::adapters::shell_command_adapter::ShellCommandAdapter;
use crate::adapters::sqlite_store_adapter::{SqliteStoreAdapter, DEFAULT_STORE_FILE};
use crate::domain::error::HypermanagerError;
use crate::domain::orchestrator::{Orchestrator, RunSettings};
use crate::domain::schema::build_schema;
use crate::domain::space::{resolve_spaces, Space};
use crate::ports::store_port::StorePort;

#[derive(Parser, Debug)]
#[command(
    name = "hypermanager",
    about = "Runs a hyperopt command repeatedly and records every epoch in SQLite"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the optimizer command N times, persisting one batch per run
    Run {
        /// Full optimizer command. Its trailing tokens after `--spaces`
        /// select the parameter spaces, so `--spaces` must be its last
        /// option.
        #[arg(short = 'x', long)]
        cmd: String,

        /// How many times to run the command
        #[arg(short = 'y', long, default_value_t = 1)]
        iterations: u32,

        /// Delete the store and create it fresh before the first run.
        /// Required whenever the space selection changed.
        #[arg(short = 'z', long)]
        drop_db: bool,

        /// Store location
        #[arg(long, default_value = DEFAULT_STORE_FILE)]
        db: PathBuf,

        /// Results artifact the optimizer writes after each run
        #[arg(long, default_value = DEFAULT_RESULTS_FILE)]
        results: PathBuf,

        /// Persist whatever the artifact holds even when the optimizer
        /// command exits non-zero
        #[arg(long)]
        keep_going: bool,
    },
    /// Create a fresh, empty store for a space selection
    InitDb {
        /// Space tokens: "all", "default", or explicit space names
        #[arg(long, num_args = 1.., required = true)]
        spaces: Vec<String>,

        /// Store location
        #[arg(long, default_value = DEFAULT_STORE_FILE)]
        db: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Run {
            cmd,
            iterations,
            drop_db,
            db,
            results,
            keep_going,
        } => run_loop(cmd, iterations, drop_db, &db, &results, keep_going),
        Command::InitDb { spaces, db } => run_init_db(&spaces, &db),
    }
}

/// Pull the space selection out of the optimizer command line: every token
/// after its `--spaces` flag.
pub fn extract_spaces(cmd: &str) -> Result<Vec<String>, HypermanagerError> {
    let tokens: Vec<&str> = cmd.split_whitespace().collect();
    let marker = tokens
        .iter()
        .position(|t| *t == "--spaces")
        .ok_or(HypermanagerError::SpacesMissing)?;
    Ok(tokens[marker + 1..].iter().map(|t| t.to_string()).collect())
}

fn run_loop(
    cmd: String,
    iterations: u32,
    drop_db: bool,
    db: &Path,
    results: &Path,
    keep_going: bool,
) -> ExitCode {
    let spaces = match extract_spaces(&cmd).and_then(|tokens| resolve_spaces(&tokens)) {
        Ok(spaces) => spaces,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    eprintln!(
        "Spaces: {}",
        spaces
            .iter()
            .map(Space::token)
            .collect::<Vec<_>>()
            .join(", ")
    );

    let command = ShellCommandAdapter;
    let results_port = ResultsFileAdapter::new(results);
    let store = SqliteStoreAdapter::new(db);
    let status = ConsoleStatusAdapter;

    let orchestrator = Orchestrator {
        command: &command,
        results: &results_port,
        store: &store,
        status: &status,
    };
    let settings = RunSettings {
        command: cmd,
        iterations,
        drop_existing: drop_db,
        keep_going,
    };

    match orchestrator.run(&settings, &spaces) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn run_init_db(tokens: &[String], db: &Path) -> ExitCode {
    let spaces = match resolve_spaces(tokens) {
        Ok(spaces) => spaces,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let schema = build_schema(&spaces);
    let store = SqliteStoreAdapter::new(db);
    match store.initialize(&schema) {
        Ok(()) => {
            eprintln!(
                "Store created at {} ({} columns)",
                db.display(),
                schema.columns().len()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}
