#![allow(dead_code)]

use hypermanager::domain::epoch::{EpochEntry, EpochMetrics};
use hypermanager::domain::error::HypermanagerError;
use hypermanager::domain::orchestrator::CommandExit;
use hypermanager::ports::command_port::CommandPort;
use hypermanager::ports::results_port::ResultsPort;
use hypermanager::ports::status_port::{StatusEvent, StatusPort};
use serde_json::json;
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

/// An epoch entry with every metric present and a parameter value for all
/// five spaces.
pub fn full_entry(epoch: i64) -> EpochEntry {
    EpochEntry {
        is_best: Some(epoch == 1),
        current_epoch: Some(epoch),
        loss: Some(-0.5 * epoch as f64),
        results_metrics: Some(EpochMetrics {
            trade_count: Some(20 + epoch),
            avg_profit: Some(0.4),
            total_profit: Some(8.0),
            profit: Some(3.2),
            duration: Some(120.0),
        }),
        params_details: HashMap::from([
            ("buy".to_string(), json!({"rsi-value": 30})),
            ("sell".to_string(), json!({"sell-rsi-value": 70})),
            ("roi".to_string(), json!({"0": 0.1, "30": 0.05})),
            ("stoploss".to_string(), json!(-0.3)),
            ("trailing".to_string(), json!("disabled")),
        ]),
    }
}

/// Records every invocation; replies with queued exits, then success.
pub struct MockCommandPort {
    pub invocations: RefCell<Vec<String>>,
    pub exits: RefCell<VecDeque<CommandExit>>,
}

impl MockCommandPort {
    pub fn new() -> Self {
        Self {
            invocations: RefCell::new(Vec::new()),
            exits: RefCell::new(VecDeque::new()),
        }
    }

    pub fn with_exit(self, code: Option<i32>) -> Self {
        self.exits.borrow_mut().push_back(CommandExit { code });
        self
    }

    pub fn invocation_count(&self) -> usize {
        self.invocations.borrow().len()
    }
}

impl CommandPort for MockCommandPort {
    fn invoke(&self, command: &str) -> Result<CommandExit, HypermanagerError> {
        self.invocations.borrow_mut().push(command.to_string());
        Ok(self
            .exits
            .borrow_mut()
            .pop_front()
            .unwrap_or(CommandExit { code: Some(0) }))
    }
}

/// Hands out one queued epoch collection per load.
pub struct MockResultsPort {
    pub runs: RefCell<VecDeque<Vec<EpochEntry>>>,
    pub loads: RefCell<usize>,
}

impl MockResultsPort {
    pub fn new() -> Self {
        Self {
            runs: RefCell::new(VecDeque::new()),
            loads: RefCell::new(0),
        }
    }

    pub fn with_run(self, entries: Vec<EpochEntry>) -> Self {
        self.runs.borrow_mut().push_back(entries);
        self
    }

    pub fn load_count(&self) -> usize {
        *self.loads.borrow()
    }
}

impl ResultsPort for MockResultsPort {
    fn load_epochs(&self) -> Result<Vec<EpochEntry>, HypermanagerError> {
        *self.loads.borrow_mut() += 1;
        self.runs
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| HypermanagerError::ResultsUnavailable {
                reason: "no run queued".to_string(),
            })
    }
}

/// Collects orchestrator events for assertions.
pub struct RecordingStatus {
    pub events: RefCell<Vec<StatusEvent>>,
}

impl RecordingStatus {
    pub fn new() -> Self {
        Self {
            events: RefCell::new(Vec::new()),
        }
    }
}

impl StatusPort for RecordingStatus {
    fn emit(&self, event: StatusEvent) {
        self.events.borrow_mut().push(event);
    }
}
