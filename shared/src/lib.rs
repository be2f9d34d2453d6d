//! Shared types for the producer/consumer pipeline
//!
//! Contains the pieces both sides of the queue depend on: the bounded queue
//! itself, the completion signal, the recorded sample type and logging.

pub mod errors;
pub mod logging;
pub mod sync;
pub mod types;

pub use errors::*;
pub use sync::{BoundedQueue, CompletionCallback, CompletionSignal};
pub use types::*;
