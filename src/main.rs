// src/main.rs
use std::path::PathBuf;

use clap::Parser;
use startlist_extractor::storage::{self, StorageManager};
use startlist_extractor::utils::{self, html_debug, AppError};
use startlist_extractor::{ExtractOptions, RaceExtractor};

/// Command Line Interface for the startlist extractor
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Saved startlist page (HTML)
    #[arg(short, long)]
    input: PathBuf,

    /// Output directory for extracted JSON
    #[arg(short, long, default_value = "./output")]
    output_dir: PathBuf,

    /// Debug mode - include column headers and save an annotated copy of the page
    #[arg(short, long)]
    debug: bool,

    /// Print JSON to stdout instead of writing a file
    #[arg(long)]
    stdout: bool,
}

fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::info!("Starting processing for args: {:?}", args);

    // 3. Read the page
    let content = std::fs::read_to_string(&args.input).map_err(|e| {
        AppError::Config(format!("Could not read input file {}: {}", args.input.display(), e))
    })?;
    tracing::info!("Read {} bytes from {}", content.len(), args.input.display());

    // 4. Extract
    let extractor = RaceExtractor::new(ExtractOptions { debug: args.debug });
    let result = extractor.extract(&content)?;

    if result.races.is_empty() {
        tracing::warn!("No races with a startlist table were found in {}", args.input.display());
    }

    // 5. Output
    if args.stdout {
        println!("{}", storage::to_pretty_json(&result)?);
    } else {
        let store = StorageManager::new(&args.output_dir)?;
        let path = store.save_result(&result)?;
        tracing::info!("Saved {} races to {}", result.races.len(), path.display());

        if args.debug {
            let debug_path = store.path_for(&format!("{}_annotated.html", StorageManager::file_stem(&result)));
            match html_debug::create_debug_html(&content, &debug_path, html_debug::MARKER_PATTERNS) {
                Ok(markers) => tracing::info!("Created annotated debug HTML with {} markers: {}", markers, debug_path.display()),
                Err(e) => tracing::warn!("Failed to create debug HTML: {}", e),
            }
        }
    }

    tracing::info!(
        "Processing finished. Races: {}, Competitors: {}",
        result.races.len(),
        result.total_competitor_count
    );

    Ok(())
}
