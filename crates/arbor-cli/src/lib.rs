//! CLI logic for the Arbor hierarchy extractor.
//!
//! This module reads a JSON geometry document, runs one request against it
//! under the configured deadline and writes the JSON result.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{
    fs,
    io::{self, Write},
};

use log::{debug, info};

use arbor::{ArborError, Extractor, Geometry, Request, run_with_timeout};

/// Run the Arbor CLI application
///
/// Each invocation is a fresh process, so an `extract-with-root` request
/// runs a debug pass on the same input first to fill the cache it reads.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `ArborError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed input documents
/// - Extraction failures and timeouts
pub fn run(args: &Args) -> Result<(), ArborError> {
    info!(
        input_path = args.input,
        action = args.action;
        "Processing geometry"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    let request = Request::from_action(&args.action, args.root)?;
    let geometry = read_geometry(&args.input)?;
    let timeout = app_config.extraction().timeout();

    let response = run_with_timeout(timeout, move || {
        let mut extractor = Extractor::new(app_config);
        if let Request::ExtractWithRoot(_) = request {
            debug!("Running debug pass to fill the snapshot cache");
            extractor.debug(&geometry)?;
        }
        extractor.handle(request, &geometry)
    })?;

    let json = serde_json::to_string_pretty(&response).map_err(io::Error::other)?;
    match &args.output {
        Some(path) => {
            fs::write(path, json)?;
            info!(output_file = path; "Result written");
        }
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{json}")?;
        }
    }

    Ok(())
}

/// Reads and decodes a geometry document.
fn read_geometry(path: &str) -> Result<Geometry, ArborError> {
    let content = fs::read_to_string(path)?;
    let geometry: Geometry =
        serde_json::from_str(&content).map_err(|err| ArborError::Input(format!("{path}: {err}")))?;
    debug!(stats:% = geometry.stats(); "Geometry loaded");
    Ok(geometry)
}
