use anyhow::{Context, Result};
use clap::Parser;

use patchdump::cli::Cli;
use patchdump::logging::init_tracing;
use patchdump::reader::RecordReader;
use patchdump::{ExtractEvent, Extractor};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = cli.resolve_config().context("Failed to load configuration")?;

    let reader = RecordReader::open(&cli.metrics_file)?;
    println!("Parsing metrics file: {}", cli.metrics_file.display());

    let extractor = Extractor::from_config(&config);
    let summary = extractor.run_reader(reader, &mut print_event)?;
    tracing::debug!(
        lines = summary.lines_read,
        malformed = summary.malformed_lines,
        sessions = summary.count(),
        "extraction finished"
    );

    println!();
    println!("{}", summary.message());
    Ok(())
}

fn print_event(event: ExtractEvent) {
    if matches!(event, ExtractEvent::FailureFound { .. }) {
        println!();
    }
    println!("{}", event.message());
}
