//! Test fixtures and data for orchestrator tests

#![allow(dead_code)]

use orchestrator::RunConfig;
use std::time::Duration;

/// Standard test data and fixtures
pub struct TestFixtures;

impl TestFixtures {
    /// Upper bound for any run or shutdown in these tests
    pub const RUN_TIMEOUT: Duration = Duration::from_secs(30);

    /// Small queue to force producers into backpressure
    pub const TIGHT_CAPACITY: usize = 4;

    /// The classic three producers, three consumers, capacity 1000
    pub fn classic(range: u32) -> RunConfig {
        RunConfig::new(range)
    }

    pub fn single_pair(range: u32) -> RunConfig {
        RunConfig::new(range).with_producers(1).with_consumers(1)
    }

    pub fn crowded(range: u32) -> RunConfig {
        RunConfig::new(range)
            .with_producers(8)
            .with_consumers(8)
            .with_capacity(Self::TIGHT_CAPACITY)
    }
}
