//! Shared error types for the producer/consumer pipeline

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SharedError {
    #[error("Invalid configuration: {field} = {value}")]
    InvalidConfig { field: String, value: String },
}

impl SharedError {
    pub fn invalid_config(field: impl Into<String>, value: impl ToString) -> Self {
        SharedError::InvalidConfig {
            field: field.into(),
            value: value.to_string(),
        }
    }
}

pub type SharedResult<T> = Result<T, SharedError>;

/// Outcome of a blocking queue operation abandoned because completion was requested.
///
/// Not a failure: callers use it to tell "shutting down" apart from a real value.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("wait abandoned: completion requested")]
pub struct Cancelled;
