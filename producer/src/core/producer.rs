//! Producer worker loop

use shared::{worker_debug, BoundedQueue, CompletionSignal, WorkerId, WorkerStats};

use crate::traits::ValueSource;

/// A producer worker: pulls values from its source and pushes them into the queue
pub struct Producer<S: ValueSource> {
    id: WorkerId,
    source: S,
    stats: WorkerStats,
}

impl<S: ValueSource> Producer<S> {
    pub fn new(id: WorkerId, source: S) -> Self {
        Self {
            id,
            source,
            stats: WorkerStats::default(),
        }
    }

    /// Push values until completion is requested.
    ///
    /// A push abandoned because of completion ends the loop; that value is
    /// not counted as produced.
    pub fn run(&mut self, queue: &BoundedQueue<u32>, signal: &CompletionSignal) -> WorkerStats {
        worker_debug!(self.id, "producer started");

        while !signal.is_completion_requested() {
            let value = self.source.next_value();
            if queue.push(value, signal).is_err() {
                break;
            }
            self.stats.produced += 1;
        }

        worker_debug!(self.id, produced = self.stats.produced, "producer stopped");
        self.stats
    }

    pub fn stats(&self) -> WorkerStats {
        self.stats
    }
}
