//! # Mention Sweep
//!
//! A one-shot collector that pulls recent news articles mentioning a public
//! figure from the News API `everything` endpoint and saves them as a single
//! pretty-printed JSON file.
//!
//! ## Features
//!
//! - Queries one daily window per calendar day over a configurable span
//!   (default: the last 28 days), newest day first
//! - Searches a configurable list of mention terms across a fixed roster of
//!   North American outlets
//! - Keeps only articles whose title or description actually contains one of
//!   the terms, case-insensitively
//! - Writes every kept article verbatim, unknown fields included, to one
//!   JSON array on disk
//!
//! ## Usage
//!
//! ```sh
//! NEWS_API_KEY=... mention_sweep -d 28 -o trump_last.json
//! ```
//!
//! ## Architecture
//!
//! The run is a straight pipeline:
//! 1. **Windows**: derive one `[from, to]` pair per day, today backwards
//! 2. **Fetching**: query the API once per window, pausing briefly between
//! 3. **Filtering**: drop articles that merely matched in the body text
//! 4. **Output**: write the accumulated articles as one JSON array

use clap::Parser;
use std::error::Error;
use tracing::{debug, info, instrument};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod cli;
mod config;
mod fetch;
mod filter;
mod models;
mod output;
mod run;
mod windows;

use cli::Cli;
use config::RunConfig;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("mention_sweep starting up");

    // Parse CLI. The API key stays out of the logs.
    let args = Cli::parse();
    debug!(?args.config, ?args.days, ?args.output, "Parsed CLI arguments");

    let config = RunConfig::resolve(&args)?;
    info!(
        days = config.days,
        terms = config.terms.len(),
        sources = config.sources.len(),
        language = %config.language,
        page_size = config.page_size,
        output = %config.output.display(),
        "Configuration resolved"
    );

    let summary = run::execute(&config).await?;

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        saved = summary.saved,
        windows = summary.windows,
        failed_windows = summary.failed_windows,
        "Execution complete"
    );

    Ok(())
}
