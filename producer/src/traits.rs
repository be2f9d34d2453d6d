//! Producer trait definitions for dependency injection

/// Source of candidate values for a producer.
///
/// Each producer owns its source, so implementations need not be `Sync`.
#[mockall::automock]
pub trait ValueSource: Send {
    /// Next candidate value; may repeat and may fall outside the target range
    fn next_value(&mut self) -> u32;
}
