//! Run configuration and validation of user input

use serde::Serialize;
use shared::{DEFAULT_QUEUE_CAPACITY, DEFAULT_WORKER_COUNT, MAX_RANGE};

use crate::error::{OrchestratorError, OrchestratorResult};

/// Parameters of one collection run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunConfig {
    /// Values are drawn from `[1, range]` and the run ends once all are recorded
    pub range: u32,
    pub producers: usize,
    pub consumers: usize,
    /// Queue capacity
    pub capacity: usize,
}

impl RunConfig {
    /// Configuration with the default worker counts and queue capacity
    pub fn new(range: u32) -> Self {
        Self {
            range,
            producers: DEFAULT_WORKER_COUNT,
            consumers: DEFAULT_WORKER_COUNT,
            capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }

    pub fn with_producers(mut self, producers: usize) -> Self {
        self.producers = producers;
        self
    }

    pub fn with_consumers(mut self, consumers: usize) -> Self {
        self.consumers = consumers;
        self
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Reject configurations that could never complete
    pub fn validate(&self) -> OrchestratorResult<()> {
        if self.range == 0 || self.range > MAX_RANGE {
            return Err(OrchestratorError::config("range", self.range));
        }
        if self.producers == 0 {
            return Err(OrchestratorError::config("producers", self.producers));
        }
        if self.consumers == 0 {
            return Err(OrchestratorError::config("consumers", self.consumers));
        }
        if self.capacity == 0 {
            return Err(OrchestratorError::config("capacity", self.capacity));
        }
        Ok(())
    }
}

/// Parse the `N` argument: an integer in `[1, MAX_RANGE]`
pub fn parse_range_argument(argument: &str) -> OrchestratorResult<u32> {
    let reason = format!("N should be in [1,{MAX_RANGE}]");

    let value: i64 = argument
        .trim()
        .parse()
        .map_err(|_| OrchestratorError::invalid_argument(argument, reason.clone()))?;

    if value <= 0 || value > i64::from(MAX_RANGE) {
        return Err(OrchestratorError::invalid_argument(argument, reason));
    }

    u32::try_from(value).map_err(|_| OrchestratorError::invalid_argument(argument, "N does not fit"))
}
