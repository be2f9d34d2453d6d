//! Orchestrator library for the distinct-value pipeline
//!
//! Spawns producer and consumer threads around a shared bounded queue,
//! deduplicates consumed values in a fixed-size store and stops every worker
//! once each value of `[1, N]` has been recorded.

pub mod cli;
pub mod config;
pub mod coordinator;
pub mod core;
pub mod error;
pub mod report;
pub mod services;
pub mod traits;

// Re-export commonly used types
pub use crate::core::{Consumer, DedupStore, RecordOutcome};
pub use config::{parse_range_argument, RunConfig};
pub use coordinator::WorkerCoordinator;
pub use error::{OrchestratorError, OrchestratorResult};
pub use report::{RunReport, WorkerSummary};
pub use traits::{RecordEvent, RecordSink};
