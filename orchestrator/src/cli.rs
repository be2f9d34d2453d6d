//! Command line surface of the `orchestrator` binary
//!
//! Input problems never abort the process: they resolve to a message for the
//! user and a clean exit, without any worker being started.

use clap::{Parser, ValueEnum};
use shared::{DEFAULT_QUEUE_CAPACITY, DEFAULT_WORKER_COUNT};

use crate::config::{parse_range_argument, RunConfig};
use crate::error::OrchestratorError;

/// How the results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One line per new value as it is recorded, then the average
    Text,
    /// A single JSON report once the run is over
    Json,
}

/// Collect every value of [1, N] from concurrent random producers
#[derive(Parser, Debug)]
#[command(name = "orchestrator")]
#[command(about = "Collects every value of [1, N] from concurrent random producers")]
pub struct Args {
    /// Number of distinct values to generate (N)
    #[arg(allow_hyphen_values = true)]
    pub count: Option<String>,

    /// Number of producer threads
    #[arg(long, default_value_t = DEFAULT_WORKER_COUNT)]
    pub producers: usize,

    /// Number of consumer threads
    #[arg(long, default_value_t = DEFAULT_WORKER_COUNT)]
    pub consumers: usize,

    /// Capacity of the queue between producers and consumers
    #[arg(long, default_value_t = DEFAULT_QUEUE_CAPACITY)]
    pub capacity: usize,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

/// What the binary should do for a given set of arguments
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Print the message and exit without starting workers
    Message(String),
    Run { config: RunConfig, format: OutputFormat },
}

impl Args {
    pub fn resolve(&self, program: &str) -> Command {
        let Some(argument) = self.count.as_deref() else {
            return Command::Message(no_arguments_text(program));
        };

        let range = match parse_range_argument(argument) {
            Ok(range) => range,
            Err(e) => return Command::Message(bad_argument_text(&e, program)),
        };

        let config = RunConfig::new(range)
            .with_producers(self.producers)
            .with_consumers(self.consumers)
            .with_capacity(self.capacity);

        match config.validate() {
            Ok(()) => Command::Run {
                config,
                format: self.format,
            },
            Err(e) => Command::Message(bad_argument_text(&e, program)),
        }
    }
}

pub fn usage_text(program: &str) -> String {
    format!("\n\nCorrect usage: {program} N\n\n     where N is Number of elements to generate\n")
}

pub fn no_arguments_text(program: &str) -> String {
    format!("No arguments provided.\nCorrect usage: {program} [Number of elements to generate]")
}

/// Message for arguments clap itself rejects (unknown options, bad values)
pub fn parse_error_text(error: &clap::Error, program: &str) -> String {
    let reason = error.to_string();
    let first_line = reason.lines().next().unwrap_or_default();
    format!("Bad argument: {first_line}{}", usage_text(program))
}

pub fn bad_argument_text(error: &OrchestratorError, program: &str) -> String {
    let usage = usage_text(program);
    match error {
        OrchestratorError::InvalidArgument { .. } => format!("{error}{usage}"),
        OrchestratorError::ConfigurationError { field, value } => {
            format!("Bad argument: {field} = {value}{usage}")
        }
        other => format!("Bad argument: {other}{usage}"),
    }
}
