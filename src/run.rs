//! Orchestration of one collection run.
//!
//! The run walks the generated windows in order, newest first. Every window
//! is fetched exactly once; a failed window is logged and skipped, never
//! fatal. Whatever accumulated by the end (possibly nothing) is written to
//! the output file in a single final step, so the run always finishes with a
//! well-formed JSON array on disk.

use crate::config::RunConfig;
use crate::fetch::Fetcher;
use crate::models::Article;
use crate::output;
use crate::windows;
use chrono::Local;
use std::error::Error;
use tokio::time::sleep;
use tracing::{error, info, instrument};

/// Totals from a finished run, for the final summary line.
#[derive(Debug)]
pub struct RunSummary {
    /// Articles written to the output file.
    pub saved: usize,
    /// Windows queried.
    pub windows: usize,
    /// Windows that ended in a transport or parse failure.
    pub failed_windows: usize,
}

/// Drive one full collection run: generate the windows, fetch each in order
/// with a polite pause between them, and write the accumulated articles once
/// at the end.
#[instrument(level = "info", skip_all, fields(days = config.days))]
pub async fn execute(config: &RunConfig) -> Result<RunSummary, Box<dyn Error>> {
    let today = Local::now().date_naive();
    let windows = windows::generate_windows(today, config.days);
    info!(count = windows.len(), from = %today, "Generated daily windows");

    let fetcher = Fetcher::new(config);
    let mut collected: Vec<Article> = Vec::new();
    let mut failed_windows = 0usize;

    for (i, window) in windows.iter().enumerate() {
        match fetcher.fetch_window(*window).await {
            Ok(batch) => collected.extend(batch),
            Err(e) => {
                failed_windows += 1;
                error!(
                    from = %window.start,
                    to = %window.end,
                    error = %e,
                    "Window failed; continuing with the next one"
                );
            }
        }

        if i + 1 < windows.len() {
            sleep(config.delay).await;
        }
    }

    output::write_articles(&collected, &config.output).await?;

    Ok(RunSummary {
        saved: collected.len(),
        windows: windows.len(),
        failed_windows,
    })
}
