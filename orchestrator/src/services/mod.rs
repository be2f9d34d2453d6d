//! Service implementations for the traits in [`crate::traits`]

pub mod sinks;

pub use sinks::{CollectingSink, LineSink, NullSink, StdoutSink};
