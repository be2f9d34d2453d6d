//! Producer error types

use thiserror::Error;

/// Result type for producer operations
pub type ProducerResult<T> = Result<T, ProducerError>;

/// Producer error types
#[derive(Error, Debug)]
pub enum ProducerError {
    #[error("Invalid range: [{first}, {last}] is empty")]
    InvalidRange { first: u32, last: u32 },
}
