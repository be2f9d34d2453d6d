//! Record sink implementations

use std::io::{self, Stdout, Write};
use std::sync::{Mutex, PoisonError};

use tracing::warn;

use crate::traits::{RecordEvent, RecordSink};

/// Format one live record line, padding number and order to `width` digits
pub fn format_record_line(event: &RecordEvent, width: usize) -> String {
    format!(
        "Thread: {:>5}, Number: {:>width$}, Order: {:>width$}, Elapsed time in microseconds: {}",
        event.thread, event.sample.value, event.sample.order, event.sample.elapsed_micros,
    )
}

/// Digit width of the largest value in `[1, range]`
pub fn digit_width(range: u32) -> usize {
    range.max(1).ilog10() as usize + 1
}

/// Writes one line per recorded value
pub struct LineSink<W: Write + Send> {
    writer: Mutex<W>,
    width: usize,
}

/// Live output of the CLI
pub type StdoutSink = LineSink<Stdout>;

impl<W: Write + Send> LineSink<W> {
    pub fn new(writer: W, range: u32) -> Self {
        Self {
            writer: Mutex::new(writer),
            width: digit_width(range),
        }
    }

    /// Recover the writer, e.g. to inspect captured output
    pub fn into_inner(self) -> W {
        self.writer.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl LineSink<Stdout> {
    pub fn stdout(range: u32) -> Self {
        Self::new(io::stdout(), range)
    }
}

impl<W: Write + Send> RecordSink for LineSink<W> {
    fn on_record(&self, event: &RecordEvent) {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = writeln!(writer, "{}", format_record_line(event, self.width)) {
            warn!(error = %e, "failed to write record line");
        }
    }
}

/// Discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl RecordSink for NullSink {
    fn on_record(&self, _event: &RecordEvent) {}
}

/// Keeps every event in memory
#[derive(Debug, Default)]
pub struct CollectingSink {
    events: Mutex<Vec<RecordEvent>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events received so far, in arrival order
    pub fn events(&self) -> Vec<RecordEvent> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl RecordSink for CollectingSink {
    fn on_record(&self, event: &RecordEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
    }
}
