//! Producer library for the distinct-value pipeline
//!
//! Provides the random value source and the worker loop that feeds the
//! shared bounded queue until completion is requested.

pub mod core;
pub mod error;
pub mod traits;

// Re-export main types
pub use crate::core::{Producer, RangeRandomizer};
pub use error::{ProducerError, ProducerResult};
pub use traits::*;
