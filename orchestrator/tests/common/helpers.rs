//! Test helper functions and utilities

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;

use orchestrator::services::CollectingSink;
use orchestrator::{OrchestratorResult, RecordEvent, RunConfig, RunReport, WorkerCoordinator};

use super::fixtures::TestFixtures;

/// Helper functions for common test operations
pub struct TestHelpers;

impl TestHelpers {
    /// Run a coordinator on its own thread, failing the test on a hang
    pub fn run_bounded(config: RunConfig) -> (OrchestratorResult<RunReport>, Vec<RecordEvent>) {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let sink = Arc::new(CollectingSink::new());
            let result = WorkerCoordinator::new(config).and_then(|c| c.run(sink.clone()));
            let _ = tx.send((result, sink.events()));
        });

        rx.recv_timeout(TestFixtures::RUN_TIMEOUT)
            .expect("run did not finish in time: workers deadlocked or never stopped")
    }

    /// Run to completion and return the report with the live events
    pub fn run_ok(config: RunConfig) -> (RunReport, Vec<RecordEvent>) {
        let (result, events) = Self::run_bounded(config);
        (result.expect("run failed"), events)
    }

    /// Assert the report covers exactly `[1, range]` with orders forming a permutation
    pub fn assert_exact_cover(report: &RunReport) {
        let range = report.config.range;
        let values: Vec<u32> = report.samples.iter().map(|s| s.value).collect();
        assert_eq!(values, (1..=range).collect::<Vec<_>>(), "values must be exactly 1..=N");

        let orders: HashSet<u32> = report.samples.iter().map(|s| s.order).collect();
        assert_eq!(orders, (1..=range).collect(), "orders must be a permutation of 1..=N");
    }

    /// Assert the live events were emitted in order 1, 2, ..., N
    pub fn assert_events_in_order(events: &[RecordEvent], range: u32) {
        let orders: Vec<u32> = events.iter().map(|e| e.sample.order).collect();
        assert_eq!(orders, (1..=range).collect::<Vec<_>>());
    }
}
