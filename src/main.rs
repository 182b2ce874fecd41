// src/main.rs
mod corpus;
mod extractors;
mod normalize;
mod storage;
mod utils;

use clap::Parser;
use corpus::CorpusWalker;
use std::path::Path;
use storage::RecordWriter;
use utils::AppError;

/// Command Line Interface for the 10-K section extraction pipeline
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Root of the downloaded filings tree
    #[arg(short, long, default_value = "data/raw")]
    input_dir: String,

    /// Destination JSONL file, one record per extracted section
    #[arg(short, long, default_value = "data/processed/sections.jsonl")]
    output: String,
}

fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::info!("Starting section extraction for args: {:?}", args);

    if !Path::new(&args.input_dir).is_dir() {
        return Err(AppError::Config(format!(
            "Input directory does not exist: {}",
            args.input_dir
        )));
    }

    // 3. Open the output stream; a previous run's output is truncated
    let writer = RecordWriter::create(&args.output)?;
    tracing::info!("Writing section records to {}", writer.path().display());

    // 4. Walk the corpus and run the per-document pipeline
    let walker = CorpusWalker::new(&args.input_dir);
    let summary = walker.run(writer)?;

    tracing::info!(
        "Processing finished. Candidates: {}, processed: {}, records emitted: {}",
        summary.candidates,
        summary.processed,
        summary.records
    );

    Ok(())
}
