//! SQLite store adapter: owns the results file lifecycle and batch writes.
//!
//! The store is opened fresh for every operation and released when the
//! operation returns, so no handle outlives an iteration.

use crate::domain::epoch::RunBatch;
use crate::domain::error::HypermanagerError;
use crate::domain::schema::TableSchema;
use crate::ports::store_port::StorePort;
use rusqlite::{params_from_iter, Connection};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Store location used when none is given.
pub const DEFAULT_STORE_FILE: &str = "hyperopt.results.sqlite";

pub struct SqliteStoreAdapter {
    path: PathBuf,
}

impl SqliteStoreAdapter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn open(&self) -> Result<Connection, HypermanagerError> {
        Connection::open(&self.path).map_err(|e: rusqlite::Error| HypermanagerError::Store {
            reason: format!("cannot open {}: {e}", self.path.display()),
        })
    }
}

impl StorePort for SqliteStoreAdapter {
    fn initialize(&self, schema: &TableSchema) -> Result<(), HypermanagerError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            // Nothing to reset on the first ever run.
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => {
                return Err(HypermanagerError::Store {
                    reason: format!("cannot remove {}: {e}", self.path.display()),
                });
            }
        }

        let conn = self.open()?;
        conn.execute(&schema.create_table_sql(), [])
            .map_err(|e: rusqlite::Error| HypermanagerError::Store {
                reason: e.to_string(),
            })?;
        Ok(())
    }

    fn write_batch(
        &self,
        schema: &TableSchema,
        batch: &RunBatch,
    ) -> Result<(), HypermanagerError> {
        let mut conn = self.open()?;
        let tx = conn
            .transaction()
            .map_err(|e: rusqlite::Error| HypermanagerError::Store {
                reason: e.to_string(),
            })?;

        {
            let mut stmt = tx.prepare(&schema.insert_sql()).map_err(
                |e: rusqlite::Error| HypermanagerError::Store {
                    reason: e.to_string(),
                },
            )?;
            for record in &batch.records {
                // An early return drops the open transaction, rolling the
                // whole batch back.
                stmt.execute(params_from_iter(record.values().iter())).map_err(
                    |e: rusqlite::Error| HypermanagerError::Store {
                        reason: e.to_string(),
                    },
                )?;
            }
        }

        tx.commit()
            .map_err(|e: rusqlite::Error| HypermanagerError::Store {
                reason: e.to_string(),
            })
    }
}
