//! Epoch entries as harvested from the optimizer's results artifact, and
//! their flattening into rows for the store.

use crate::domain::error::HypermanagerError;
use crate::domain::space::Space;
use serde::Deserialize;
use std::collections::HashMap;

/// Aggregate trading metrics of one epoch, as found in the artifact.
///
/// Fields stay optional at this layer; extraction decides whether an
/// absence is fatal.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EpochMetrics {
    pub trade_count: Option<i64>,
    pub avg_profit: Option<f64>,
    pub total_profit: Option<f64>,
    pub profit: Option<f64>,
    pub duration: Option<f64>,
}

/// One epoch as the results loader hands it over.
///
/// `params_details` holds the optimizer's rendering of each space's
/// parameter values, keyed by space token.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EpochEntry {
    pub is_best: Option<bool>,
    pub current_epoch: Option<i64>,
    pub loss: Option<f64>,
    pub results_metrics: Option<EpochMetrics>,
    pub params_details: HashMap<String, serde_json::Value>,
}

/// The result collection harvested from one optimizer invocation.
#[derive(Debug, Clone, Default)]
pub struct RunHandle {
    pub entries: Vec<EpochEntry>,
}

impl RunHandle {
    pub fn new(entries: Vec<EpochEntry>) -> Self {
        Self { entries }
    }

    pub fn epoch_count(&self) -> usize {
        self.entries.len()
    }
}

/// One validated, flattened row of the results table.
#[derive(Debug, Clone, PartialEq)]
pub struct EpochRecord {
    pub iteration: u32,
    pub best_local_min: bool,
    pub current_epoch: i64,
    pub trades_count: i64,
    pub avg_profit_pct: f64,
    pub total_profit_currency: f64,
    pub total_profit_pct: f64,
    pub avg_duration_minutes: f64,
    pub loss_func: f64,
    /// One display value per selected space, in selection order.
    pub params: Vec<String>,
}

impl EpochRecord {
    /// Values in insert order (everything except id), each rendered as text.
    /// `f64` `Display` is shortest-round-trip, so numeric values survive the
    /// textual affinity unchanged.
    pub fn values(&self) -> Vec<String> {
        let mut values = vec![
            self.iteration.to_string(),
            self.best_local_min.to_string(),
            self.current_epoch.to_string(),
            self.trades_count.to_string(),
            self.avg_profit_pct.to_string(),
            self.total_profit_currency.to_string(),
            self.total_profit_pct.to_string(),
            self.avg_duration_minutes.to_string(),
            self.loss_func.to_string(),
        ];
        values.extend(self.params.iter().cloned());
        values
    }
}

/// The write unit of one run: every record the run produced, in epoch order.
#[derive(Debug, Clone, Default)]
pub struct RunBatch {
    pub records: Vec<EpochRecord>,
}

impl RunBatch {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Flatten every epoch of one run into records carrying `iteration`.
///
/// Any absent metric field or space value aborts the whole batch; a partial
/// row cannot satisfy the store's NOT NULL columns.
pub fn extract_batch(
    handle: &RunHandle,
    iteration: u32,
    spaces: &[Space],
) -> Result<RunBatch, HypermanagerError> {
    let mut records = Vec::with_capacity(handle.epoch_count());
    for (position, entry) in handle.entries.iter().enumerate() {
        records.push(extract_record(entry, position, iteration, spaces)?);
    }
    Ok(RunBatch { records })
}

fn extract_record(
    entry: &EpochEntry,
    position: usize,
    iteration: u32,
    spaces: &[Space],
) -> Result<EpochRecord, HypermanagerError> {
    let metrics = entry
        .results_metrics
        .as_ref()
        .ok_or_else(|| missing(position, "results_metrics"))?;

    let mut params = Vec::with_capacity(spaces.len());
    for space in spaces {
        let value = entry
            .params_details
            .get(space.token())
            .ok_or_else(|| missing(position, space.token()))?;
        params.push(display_value(value));
    }

    Ok(EpochRecord {
        iteration,
        best_local_min: entry.is_best.ok_or_else(|| missing(position, "is_best"))?,
        current_epoch: entry
            .current_epoch
            .ok_or_else(|| missing(position, "current_epoch"))?,
        trades_count: metrics
            .trade_count
            .ok_or_else(|| missing(position, "trade_count"))?,
        avg_profit_pct: metrics
            .avg_profit
            .ok_or_else(|| missing(position, "avg_profit"))?,
        total_profit_currency: metrics
            .total_profit
            .ok_or_else(|| missing(position, "total_profit"))?,
        total_profit_pct: metrics.profit.ok_or_else(|| missing(position, "profit"))?,
        avg_duration_minutes: metrics
            .duration
            .ok_or_else(|| missing(position, "duration"))?,
        loss_func: entry.loss.ok_or_else(|| missing(position, "loss"))?,
        params,
    })
}

fn missing(epoch: usize, field: &str) -> HypermanagerError {
    HypermanagerError::MissingField {
        epoch,
        field: field.to_string(),
    }
}

/// Strings keep their literal text; anything else keeps the optimizer's
/// JSON rendering.
fn display_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
