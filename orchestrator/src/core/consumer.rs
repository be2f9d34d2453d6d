//! Consumer worker loop

use shared::{worker_debug, BoundedQueue, CompletionSignal, WorkerId, WorkerStats};

use crate::core::store::{DedupStore, RecordOutcome};

/// A consumer worker: pops values from the queue and records them in the store
#[derive(Debug)]
pub struct Consumer {
    id: WorkerId,
    stats: WorkerStats,
}

impl Consumer {
    pub fn new(id: WorkerId) -> Self {
        Self {
            id,
            stats: WorkerStats::default(),
        }
    }

    /// Record values until completion is requested.
    ///
    /// A pop abandoned because of completion carries no value, so nothing is
    /// recorded for it.
    pub fn run(
        &mut self,
        queue: &BoundedQueue<u32>,
        store: &DedupStore,
        signal: &CompletionSignal,
    ) -> WorkerStats {
        worker_debug!(self.id, "consumer started");

        while !signal.is_completion_requested() {
            let Ok(value) = queue.pop(signal) else {
                break;
            };
            self.stats.consumed += 1;

            match store.record(value) {
                RecordOutcome::Recorded(_) => self.stats.recorded += 1,
                RecordOutcome::Duplicate => self.stats.duplicates += 1,
                RecordOutcome::OutOfRange => self.stats.out_of_range += 1,
            }
        }

        worker_debug!(
            self.id,
            consumed = self.stats.consumed,
            recorded = self.stats.recorded,
            duplicates = self.stats.duplicates,
            out_of_range = self.stats.out_of_range,
            "consumer stopped"
        );
        self.stats
    }

    pub fn stats(&self) -> WorkerStats {
        self.stats
    }
}
