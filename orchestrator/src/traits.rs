//! Trait definitions with mockall annotations for testing
//!
//! The store reports every first-time recording through a [`RecordSink`], so
//! the CLI, the JSON report and the tests can each decide what to do with the
//! live stream of samples.

use shared::Sample;

/// Observability record emitted once per distinct value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordEvent {
    /// Name (or id) of the thread that recorded the value
    pub thread: String,
    pub sample: Sample,
}

/// Receives record events, in recording order.
///
/// Called while the store lock is held: implementations must be quick and
/// must not call back into the store.
#[mockall::automock]
pub trait RecordSink: Send + Sync {
    fn on_record(&self, event: &RecordEvent);
}
