//! Spawning and joining of producer and consumer threads
//!
//! A single [`CompletionSignal`] is created per run and handed to the store,
//! to every worker and to every blocking queue call. The store fires it once
//! all values are recorded; every worker then leaves its loop and the
//! coordinator joins them all before building the [`RunReport`].

use std::any::Any;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Instant;

use producer::{Producer, ProducerResult, RangeRandomizer, ValueSource};
use shared::{
    logging, worker_debug, worker_info, BoundedQueue, CompletionSignal, WorkerId, WorkerStats,
};

use crate::config::RunConfig;
use crate::core::{Consumer, DedupStore};
use crate::error::{OrchestratorError, OrchestratorResult};
use crate::report::{RunReport, WorkerSummary};
use crate::traits::RecordSink;

type WorkerHandle = (WorkerId, JoinHandle<WorkerStats>);

/// Requests completion if the owning worker thread unwinds, so the other
/// workers are not left waiting for values that will never come.
struct CompleteOnPanic {
    worker: WorkerId,
    signal: Arc<CompletionSignal>,
}

impl Drop for CompleteOnPanic {
    fn drop(&mut self) {
        if thread::panicking() {
            logging::log_shutdown(&self.worker, "worker panicked, requesting completion");
            self.signal.request_completion();
        }
    }
}

/// Runs P producers and C consumers until every value of the range is recorded
#[derive(Debug, Clone)]
pub struct WorkerCoordinator {
    config: RunConfig,
}

impl WorkerCoordinator {
    pub fn new(config: RunConfig) -> OrchestratorResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Run with one [`RangeRandomizer`] over `[1, N]` per producer
    pub fn run(&self, sink: Arc<dyn RecordSink>) -> OrchestratorResult<RunReport> {
        let range = self.config.range;
        self.run_with_sources(sink, |_| RangeRandomizer::up_to(range))
    }

    /// Run with producers fed by `make_source`, called once per producer.
    ///
    /// All sources are built before any thread starts.
    pub fn run_with_sources<S, F>(
        &self,
        sink: Arc<dyn RecordSink>,
        mut make_source: F,
    ) -> OrchestratorResult<RunReport>
    where
        S: ValueSource + 'static,
        F: FnMut(WorkerId) -> ProducerResult<S>,
    {
        let coordinator = WorkerId::Coordinator;
        let started = Instant::now();

        let signal = Arc::new(CompletionSignal::new());
        let queue = Arc::new(BoundedQueue::new(self.config.capacity)?);
        let store = Arc::new(DedupStore::new(self.config.range, Arc::clone(&signal), sink)?);

        let sources = (1..=self.config.producers)
            .map(|k| {
                let id = WorkerId::Producer(k as u32);
                make_source(id).map(|source| (id, source))
            })
            .collect::<ProducerResult<Vec<_>>>()?;

        worker_info!(
            coordinator,
            range = self.config.range,
            producers = self.config.producers,
            consumers = self.config.consumers,
            capacity = self.config.capacity,
            "starting workers"
        );

        let mut handles: Vec<WorkerHandle> =
            Vec::with_capacity(self.config.producers + self.config.consumers);

        for (id, source) in sources {
            let (queue, signal_for_worker) = (Arc::clone(&queue), Arc::clone(&signal));
            let spawned = spawn_worker(id, &signal, move || {
                Producer::new(id, source).run(&queue, &signal_for_worker)
            });
            match spawned {
                Ok(handle) => handles.push((id, handle)),
                Err(e) => return Err(abort_spawn(id, e, &signal, handles)),
            }
        }

        for k in 1..=self.config.consumers {
            let id = WorkerId::Consumer(k as u32);
            let (queue, store, signal_for_worker) =
                (Arc::clone(&queue), Arc::clone(&store), Arc::clone(&signal));
            let spawned = spawn_worker(id, &signal, move || {
                Consumer::new(id).run(&queue, &store, &signal_for_worker)
            });
            match spawned {
                Ok(handle) => handles.push((id, handle)),
                Err(e) => return Err(abort_spawn(id, e, &signal, handles)),
            }
        }

        let workers = join_all(handles)?;

        let mut totals = WorkerStats::default();
        for summary in &workers {
            totals += summary.stats;
        }
        let total_elapsed_micros = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);

        worker_info!(
            coordinator,
            recorded = store.len(),
            produced = totals.produced,
            duplicates = totals.duplicates,
            total_elapsed_micros,
            "all workers joined"
        );

        Ok(RunReport {
            config: self.config,
            samples: store.samples(),
            average_elapsed_micros: store.average_elapsed_micros(),
            total_elapsed_micros,
            queue_high_water_mark: queue.high_water_mark(),
            totals,
            workers,
        })
    }
}

fn spawn_worker<F>(
    id: WorkerId,
    signal: &Arc<CompletionSignal>,
    body: F,
) -> std::io::Result<JoinHandle<WorkerStats>>
where
    F: FnOnce() -> WorkerStats + Send + 'static,
{
    let guard = CompleteOnPanic {
        worker: id,
        signal: Arc::clone(signal),
    };
    worker_debug!(WorkerId::Coordinator, "spawning {}", id);
    thread::Builder::new().name(id.thread_name()).spawn(move || {
        let _guard = guard;
        body()
    })
}

/// Stop the workers already started after a spawn failure
fn abort_spawn(
    id: WorkerId,
    source: std::io::Error,
    signal: &CompletionSignal,
    handles: Vec<WorkerHandle>,
) -> OrchestratorError {
    logging::log_error(&WorkerId::Coordinator, "Spawning worker thread", &source);
    logging::log_shutdown(&WorkerId::Coordinator, "stopping the workers already started");
    signal.request_completion();
    // Already reporting the spawn failure; panics of the others are only logged
    let _ = join_all(handles);
    OrchestratorError::SpawnFailed { worker: id, source }
}

/// Join every worker, surfacing the first panic after all have exited
fn join_all(handles: Vec<WorkerHandle>) -> OrchestratorResult<Vec<WorkerSummary>> {
    let mut summaries = Vec::with_capacity(handles.len());
    let mut first_failure = None;

    for (worker, handle) in handles {
        match handle.join() {
            Ok(stats) => summaries.push(WorkerSummary { worker, stats }),
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                logging::log_error(&worker, "Worker thread", &message);
                first_failure.get_or_insert(OrchestratorError::WorkerPanicked { worker, message });
            }
        }
    }

    match first_failure {
        Some(error) => Err(error),
        None => Ok(summaries),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
