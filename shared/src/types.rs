//! Core types used throughout the pipeline

use serde::Serialize;
use std::fmt;
use std::ops::AddAssign;

/// Queue capacity used when none is configured
pub const DEFAULT_QUEUE_CAPACITY: usize = 1000;

/// Number of producers and of consumers used when none is configured
pub const DEFAULT_WORKER_COUNT: usize = 3;

/// Largest supported range; matches the classic `RAND_MAX` of the generator
pub const MAX_RANGE: u32 = 2_147_483_647;

/// A distinct value as first recorded by the store
///
/// The default sample (order 0) stands for "not recorded yet".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Sample {
    pub value: u32,
    /// 1-based rank in which the value was first recorded
    pub order: u32,
    /// Microseconds since the previous recording (or since the store was created)
    pub elapsed_micros: u64,
}

impl Sample {
    /// Orders start at 1, so only recorded samples have a non-zero order
    pub fn is_recorded(&self) -> bool {
        self.order != 0
    }
}

/// Identifier for any worker thread in the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum WorkerId {
    /// Producer thread with user-friendly number
    Producer(u32),
    /// Consumer thread with user-friendly number
    Consumer(u32),
    /// The thread that spawns and joins the workers
    Coordinator,
}

impl WorkerId {
    /// Thread name used when spawning this worker
    pub fn thread_name(&self) -> String {
        self.to_string()
    }

    pub fn is_producer(&self) -> bool {
        matches!(self, WorkerId::Producer(_))
    }
}

impl fmt::Display for WorkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkerId::Producer(id) => write!(f, "producer_{id}"),
            WorkerId::Consumer(id) => write!(f, "consumer_{id}"),
            WorkerId::Coordinator => write!(f, "coordinator"),
        }
    }
}

/// Per-worker counters, summed into the final report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WorkerStats {
    /// Values pushed into the queue
    pub produced: u64,
    /// Values popped from the queue
    pub consumed: u64,
    /// Values that were new to the store
    pub recorded: u64,
    pub duplicates: u64,
    pub out_of_range: u64,
}

impl AddAssign for WorkerStats {
    fn add_assign(&mut self, other: Self) {
        self.produced += other.produced;
        self.consumed += other.consumed;
        self.recorded += other.recorded;
        self.duplicates += other.duplicates;
        self.out_of_range += other.out_of_range;
    }
}
