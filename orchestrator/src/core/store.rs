//! Deduplicating store of first-seen values
//!
//! One slot per value of `[1, N]`. The first consumer to record a value wins
//! the slot and the next sequence order; every later occurrence is a no-op.
//! Recording the N-th distinct value requests completion.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::Instant;

use shared::{CompletionSignal, Sample};
use tracing::{debug, info, trace};

use crate::error::{OrchestratorError, OrchestratorResult};
use crate::traits::{RecordEvent, RecordSink};

/// Result of a single [`DedupStore::record`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// First occurrence; the sample now owned by the store
    Recorded(Sample),
    /// Already recorded by an earlier call
    Duplicate,
    /// Outside `[1, N]`; discarded
    OutOfRange,
}

struct StoreState {
    /// Indexed by `value - 1`; `order == 0` marks a free slot
    slots: Vec<Sample>,
    /// Number of set slots, also the last order handed out
    counter: u32,
    last_record: Instant,
}

/// Fixed-size deduplicating store shared by all consumers
pub struct DedupStore {
    size: u32,
    state: Mutex<StoreState>,
    signal: Arc<CompletionSignal>,
    sink: Arc<dyn RecordSink>,
}

impl DedupStore {
    /// Create a store for the values `[1, size]`.
    ///
    /// Elapsed time for the first recorded value is measured from here.
    pub fn new(
        size: u32,
        signal: Arc<CompletionSignal>,
        sink: Arc<dyn RecordSink>,
    ) -> OrchestratorResult<Self> {
        if size == 0 {
            return Err(OrchestratorError::config("store size", size));
        }

        let mut slots = Vec::new();
        slots
            .try_reserve_exact(size as usize)
            .map_err(|source| OrchestratorError::StoreAllocation { size, source })?;
        slots.resize(size as usize, Sample::default());

        Ok(Self {
            size,
            state: Mutex::new(StoreState {
                slots,
                counter: 0,
                last_record: Instant::now(),
            }),
            signal,
            sink,
        })
    }

    /// Record `value` if it is in range and not yet seen.
    pub fn record(&self, value: u32) -> RecordOutcome {
        if value == 0 || value > self.size {
            trace!(value, size = self.size, "discarding out-of-range value");
            return RecordOutcome::OutOfRange;
        }
        let index = (value - 1) as usize;

        let (sample, completed) = {
            let mut state = self.lock();
            if state.slots[index].is_recorded() {
                trace!(value, "duplicate value");
                return RecordOutcome::Duplicate;
            }

            let now = Instant::now();
            let elapsed = now.duration_since(state.last_record).as_micros();
            state.counter += 1;
            let sample = Sample {
                value,
                order: state.counter,
                elapsed_micros: u64::try_from(elapsed).unwrap_or(u64::MAX),
            };
            state.slots[index] = sample;
            state.last_record = now;

            // Emitted under the lock so observers see samples in order
            self.sink.on_record(&RecordEvent {
                thread: current_thread_label(),
                sample,
            });
            debug!(
                value = sample.value,
                order = sample.order,
                elapsed_micros = sample.elapsed_micros,
                "recorded new value"
            );

            (sample, state.counter == self.size)
        };

        // Fired outside the store lock: the signal's callbacks take queue locks
        if completed && self.signal.request_completion() {
            info!(size = self.size, "all values recorded, completion requested");
        }

        RecordOutcome::Recorded(sample)
    }

    /// Size N of the value range
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Number of distinct values recorded so far
    pub fn len(&self) -> u32 {
        self.lock().counter
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_complete(&self) -> bool {
        self.len() == self.size
    }

    pub fn contains(&self, value: u32) -> bool {
        value >= 1 && value <= self.size && self.lock().slots[(value - 1) as usize].is_recorded()
    }

    /// Recorded samples in value order
    pub fn samples(&self) -> Vec<Sample> {
        self.lock()
            .slots
            .iter()
            .filter(|sample| sample.is_recorded())
            .copied()
            .collect()
    }

    /// Recorded samples in the order they were recorded
    pub fn samples_by_order(&self) -> Vec<Sample> {
        let mut samples = self.samples();
        samples.sort_by_key(|sample| sample.order);
        samples
    }

    /// Mean of the recorded elapsed times, `None` before the first record
    pub fn average_elapsed_micros(&self) -> Option<f64> {
        let state = self.lock();
        if state.counter == 0 {
            return None;
        }
        let total: u64 = state
            .slots
            .iter()
            .filter(|sample| sample.is_recorded())
            .map(|sample| sample.elapsed_micros)
            .fold(0u64, u64::saturating_add);
        Some(total as f64 / f64::from(state.counter))
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        // A panicking sink leaves slots and counter already consistent
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn current_thread_label() -> String {
    let current = thread::current();
    match current.name() {
        Some(name) => name.to_string(),
        None => format!("{:?}", current.id()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{CollectingSink, NullSink};
    use crate::traits::MockRecordSink;
    use std::collections::HashSet;

    fn store_with_sink(size: u32) -> (DedupStore, Arc<CompletionSignal>, Arc<CollectingSink>) {
        let signal = Arc::new(CompletionSignal::new());
        let sink = Arc::new(CollectingSink::new());
        let store = DedupStore::new(size, Arc::clone(&signal), sink.clone()).unwrap();
        (store, signal, sink)
    }

    #[test]
    fn test_zero_size_rejected() {
        let result = DedupStore::new(0, Arc::new(CompletionSignal::new()), Arc::new(NullSink));
        assert!(result.is_err());
    }

    #[test]
    fn test_slots_stay_compact() {
        // Full-range stores allocate one slot per possible value
        assert_eq!(std::mem::size_of::<Sample>(), 16);

        let (store, _signal, _sink) = store_with_sink(3);
        assert!(store.samples().is_empty());
        assert_eq!(store.average_elapsed_micros(), None);
        assert!(!store.contains(1));
    }

    #[test]
    fn test_allocation_failure_is_reported() {
        let source = Vec::<Sample>::new().try_reserve_exact(usize::MAX).unwrap_err();
        let err = OrchestratorError::StoreAllocation { size: shared::MAX_RANGE, source };

        assert_eq!(err.to_string(), "Cannot allocate a store for 2147483647 values");
        assert!(std::error::Error::source(&err).is_some());
        assert!(!err.is_input_error());
    }

    #[test]
    fn test_first_record_wins() {
        let (store, _signal, sink) = store_with_sink(5);

        let first = store.record(3);
        assert!(matches!(first, RecordOutcome::Recorded(Sample { value: 3, order: 1, .. })));
        assert_eq!(store.record(3), RecordOutcome::Duplicate);
        assert_eq!(store.record(3), RecordOutcome::Duplicate);

        assert_eq!(store.len(), 1);
        assert!(store.contains(3));
        assert!(!store.contains(4));
        assert_eq!(sink.events().len(), 1);
    }

    #[test]
    fn test_out_of_range_is_discarded() {
        let (store, signal, sink) = store_with_sink(3);

        assert_eq!(store.record(0), RecordOutcome::OutOfRange);
        assert_eq!(store.record(4), RecordOutcome::OutOfRange);
        assert_eq!(store.record(u32::MAX), RecordOutcome::OutOfRange);

        assert!(store.is_empty());
        assert!(!store.contains(0));
        assert!(sink.events().is_empty());
        assert!(!signal.is_completion_requested());
    }

    #[test]
    fn test_orders_follow_recording_sequence() {
        let (store, _signal, _sink) = store_with_sink(4);

        for value in [4, 2, 2, 1] {
            store.record(value);
        }

        let by_value: Vec<(u32, u32)> = store.samples().iter().map(|s| (s.value, s.order)).collect();
        assert_eq!(by_value, vec![(1, 3), (2, 2), (4, 1)]);

        let by_order: Vec<u32> = store.samples_by_order().iter().map(|s| s.value).collect();
        assert_eq!(by_order, vec![4, 2, 1]);
    }

    #[test]
    fn test_completion_requested_exactly_when_full() {
        let (store, signal, _sink) = store_with_sink(3);

        store.record(1);
        store.record(2);
        store.record(2);
        assert!(!signal.is_completion_requested());
        assert!(!store.is_complete());

        store.record(3);
        assert!(signal.is_completion_requested());
        assert!(store.is_complete());

        // Later calls change nothing
        assert_eq!(store.record(1), RecordOutcome::Duplicate);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_single_value_store() {
        let (store, signal, sink) = store_with_sink(1);

        store.record(1);

        assert!(signal.is_completion_requested());
        let events = sink.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].sample.order, 1);
        assert_eq!(events[0].sample.value, 1);
    }

    #[test]
    fn test_sink_sees_each_new_value_once() {
        let signal = Arc::new(CompletionSignal::new());
        let mut sink = MockRecordSink::new();
        sink.expect_on_record()
            .withf(|event| event.sample.value == 2 && event.sample.order == 1)
            .times(1)
            .return_const(());
        sink.expect_on_record()
            .withf(|event| event.sample.value == 5 && event.sample.order == 2)
            .times(1)
            .return_const(());

        let store = DedupStore::new(5, signal, Arc::new(sink)).unwrap();
        for value in [2, 2, 9, 5, 2, 5] {
            store.record(value);
        }
    }

    #[test]
    fn test_event_carries_thread_name() {
        let (store, _signal, sink) = store_with_sink(2);
        let store = Arc::new(store);

        let worker = {
            let store = Arc::clone(&store);
            thread::Builder::new()
                .name("consumer_7".into())
                .spawn(move || store.record(2))
                .unwrap()
        };
        worker.join().unwrap();

        assert_eq!(sink.events()[0].thread, "consumer_7");
    }

    #[test]
    fn test_average_elapsed() {
        let (store, _signal, _sink) = store_with_sink(3);
        assert_eq!(store.average_elapsed_micros(), None);

        store.record(1);
        store.record(3);

        let samples = store.samples();
        let expected = samples.iter().map(|s| s.elapsed_micros).sum::<u64>() as f64 / 2.0;
        assert_eq!(store.average_elapsed_micros(), Some(expected));
    }

    #[test]
    fn test_concurrent_records_assign_unique_orders() {
        const SIZE: u32 = 500;
        let (store, signal, sink) = store_with_sink(SIZE);
        let store = Arc::new(store);

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for value in 1..=SIZE {
                        store.record(value);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let orders: HashSet<u32> = store.samples().iter().map(|s| s.order).collect();
        assert_eq!(orders, (1..=SIZE).collect());
        assert_eq!(sink.events().len(), SIZE as usize);
        assert!(signal.is_completion_requested());

        // Events arrive in order because they are emitted under the lock
        let emitted: Vec<u32> = sink.events().iter().map(|e| e.sample.order).collect();
        assert_eq!(emitted, (1..=SIZE).collect::<Vec<_>>());
    }
}
