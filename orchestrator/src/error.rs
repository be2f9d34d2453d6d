//! Orchestrator-specific error types

use thiserror::Error;
use producer::ProducerError;
use shared::{SharedError, WorkerId};

#[derive(Error, Debug)]
pub enum OrchestratorError {
    #[error("Bad argument: {argument}. {reason}")]
    InvalidArgument { argument: String, reason: String },

    #[error("Configuration error: {field} = {value}")]
    ConfigurationError { field: String, value: String },

    #[error("Worker {worker} panicked: {message}")]
    WorkerPanicked { worker: WorkerId, message: String },

    #[error("Failed to spawn worker thread: {worker}")]
    SpawnFailed {
        worker: WorkerId,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot allocate a store for {size} values")]
    StoreAllocation {
        size: u32,
        #[source]
        source: std::collections::TryReserveError,
    },

    #[error("Shared component error: {0}")]
    Shared(#[from] SharedError),

    #[error("Producer error: {0}")]
    Producer(#[from] ProducerError),

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl OrchestratorError {
    pub fn invalid_argument(argument: impl Into<String>, reason: impl Into<String>) -> Self {
        OrchestratorError::InvalidArgument {
            argument: argument.into(),
            reason: reason.into(),
        }
    }

    pub fn config(field: impl Into<String>, value: impl ToString) -> Self {
        OrchestratorError::ConfigurationError {
            field: field.into(),
            value: value.to_string(),
        }
    }

    /// Errors caused by user input rather than by the run itself
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            OrchestratorError::InvalidArgument { .. } | OrchestratorError::ConfigurationError { .. }
        )
    }
}

pub type OrchestratorResult<T> = Result<T, OrchestratorError>;
