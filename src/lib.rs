//! genforge: a module-evolution daemon.
//!
//! Every cycle it synthesizes a population of tagged modules, evolves it
//! under a fitness heuristic, and persists the high scorers to mirrored
//! JSON stores along with rolling counters, a daily audit log and a cycle
//! report. A small HTTP endpoint exposes live status while the loop runs.

pub mod catalog;
pub mod config;
pub mod cycle;
pub mod engines;
pub mod error;
pub mod remote;
pub mod server;
pub mod storage;
pub mod types;

pub use error::{GenforgeError, Result};
