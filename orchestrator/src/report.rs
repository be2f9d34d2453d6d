//! Final state of a run, read after every worker has joined

use std::io::{self, Write};

use serde::Serialize;
use shared::{Sample, WorkerId, WorkerStats};

use crate::config::RunConfig;
use crate::error::OrchestratorResult;

/// Significant digits of the printed average
pub const AVERAGE_PRECISION: usize = 6;

/// Format `value` with `precision` significant digits, general notation.
///
/// Fixed notation unless the decimal exponent is below -4 or at least
/// `precision`; trailing zeros are dropped (`141.857`, `20`, `1.5e+06`).
pub fn format_significant(value: f64, precision: usize) -> String {
    if value == 0.0 || !value.is_finite() {
        return value.to_string();
    }
    let precision = precision.max(1);

    // Exponent after rounding to `precision` digits
    let scientific = format!("{:.*e}", precision - 1, value);
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((scientific.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= precision as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{sign}{:02}", trim_fraction(mantissa), exponent.abs())
    } else {
        let decimals = (precision as i32 - 1 - exponent).max(0) as usize;
        trim_fraction(&format!("{value:.decimals$}")).to_string()
    }
}

fn trim_fraction(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}

/// Counters of one worker thread
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WorkerSummary {
    pub worker: WorkerId,
    pub stats: WorkerStats,
}

/// Everything the CLI prints once a run is over
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub config: RunConfig,
    /// Recorded samples in value order
    pub samples: Vec<Sample>,
    pub average_elapsed_micros: Option<f64>,
    /// Wall-clock duration of the whole run
    pub total_elapsed_micros: u64,
    pub queue_high_water_mark: usize,
    pub totals: WorkerStats,
    pub workers: Vec<WorkerSummary>,
}

impl RunReport {
    /// True when every value of the range was recorded
    pub fn is_complete(&self) -> bool {
        self.samples.len() == self.config.range as usize
    }

    /// Samples sorted by the order in which they were recorded
    pub fn samples_by_order(&self) -> Vec<Sample> {
        let mut samples = self.samples.clone();
        samples.sort_by_key(|sample| sample.order);
        samples
    }

    /// Write the closing statistics line of the text output
    pub fn write_summary<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writeln!(writer)?;
        writeln!(
            writer,
            "Average time, microseconds: {}",
            format_significant(self.average_elapsed_micros.unwrap_or(0.0), AVERAGE_PRECISION)
        )
    }

    pub fn to_json(&self) -> OrchestratorResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
