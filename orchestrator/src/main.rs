//! Main entry point for the orchestrator binary

use std::io::{self, Write};
use std::sync::Arc;

use anyhow::Context;
use clap::error::ErrorKind;
use clap::Parser;

use orchestrator::cli::{parse_error_text, Args, Command, OutputFormat};
use orchestrator::services::{NullSink, StdoutSink};
use orchestrator::{RecordSink, WorkerCoordinator};
use shared::{logging, WorkerId};

fn main() -> anyhow::Result<()> {
    let program = std::env::args()
        .next()
        .unwrap_or_else(|| "orchestrator".to_string());

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.print()?;
            return Ok(());
        }
        Err(e) => {
            println!("{}", parse_error_text(&e, &program));
            return Ok(());
        }
    };

    logging::init_tracing_with_level(Some(&args.log_level));

    let (config, format) = match args.resolve(&program) {
        Command::Message(text) => {
            println!("{text}");
            return Ok(());
        }
        Command::Run { config, format } => (config, format),
    };

    let coordinator = WorkerCoordinator::new(config)?;
    logging::log_startup(&WorkerId::Coordinator, &format!("collection of {} values", config.range));

    let sink: Arc<dyn RecordSink> = match format {
        OutputFormat::Text => Arc::new(StdoutSink::stdout(config.range)),
        OutputFormat::Json => Arc::new(NullSink),
    };

    let report = coordinator
        .run(sink)
        .inspect_err(|e| logging::log_error(&WorkerId::Coordinator, "Collection run", e))
        .context("collection run failed")?;

    let mut stdout = io::stdout().lock();
    match format {
        OutputFormat::Text => report.write_summary(&mut stdout)?,
        OutputFormat::Json => writeln!(stdout, "{}", report.to_json()?)?,
    }

    logging::log_success(&WorkerId::Coordinator, "All values collected");
    Ok(())
}
