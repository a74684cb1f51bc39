//! Results artifact reader.
//!
//! The optimizer leaves its epochs in a line-delimited JSON file, one epoch
//! document per line. This adapter is the only place that knows the
//! artifact's location and framing.

use crate::domain::epoch::EpochEntry;
use crate::domain::error::HypermanagerError;
use crate::ports::results_port::ResultsPort;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

/// Artifact location the optimizer writes to, relative to its working
/// directory.
pub const DEFAULT_RESULTS_FILE: &str = "user_data/hyperopt_results/hyperopt_results.json";

pub struct ResultsFileAdapter {
    path: PathBuf,
}

impl ResultsFileAdapter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ResultsPort for ResultsFileAdapter {
    fn load_epochs(&self) -> Result<Vec<EpochEntry>, HypermanagerError> {
        let file = File::open(&self.path).map_err(|e| HypermanagerError::ResultsUnavailable {
            reason: format!("{}: {e}", self.path.display()),
        })?;

        let mut entries = Vec::new();
        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| HypermanagerError::ResultsUnavailable {
                reason: format!("{}: {e}", self.path.display()),
            })?;
            if line.trim().is_empty() {
                continue;
            }
            let entry = serde_json::from_str(&line).map_err(|e| {
                HypermanagerError::ResultsUnavailable {
                    reason: format!("{} line {}: {e}", self.path.display(), index + 1),
                }
            })?;
            entries.push(entry);
        }
        Ok(entries)
    }
}
