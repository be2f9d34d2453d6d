//! Core business logic modules
//!
//! The deduplicating store and the consumer loop that feeds it.

pub mod consumer;
pub mod store;

pub use consumer::Consumer;
pub use store::{DedupStore, RecordOutcome};
