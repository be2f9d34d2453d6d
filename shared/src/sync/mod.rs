//! Synchronization primitives shared by producers and consumers

pub mod queue;
pub mod signal;

pub use queue::BoundedQueue;
pub use signal::{CompletionCallback, CompletionSignal};
