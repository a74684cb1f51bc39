//! hypermanager — repeated-run harness for an external hyperopt command.
//!
//! Runs the optimizer command N times and records every epoch of every run
//! into a SQLite store whose columns follow the parameter-space selection.
//!
//! Hexagonal architecture: domain logic in [`domain`], port traits in [`ports`],
//! concrete implementations in [`adapters`].

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod cli;
