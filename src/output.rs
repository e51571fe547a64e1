//! Final JSON output.
//!
//! The entire run produces exactly one file: a pretty-printed UTF-8 JSON
//! array holding every article that survived filtering, in the order the
//! windows produced them. The file is written once, at the end of the run,
//! and replaces whatever was at that path before.

use crate::models::Article;
use std::error::Error;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Write the accumulated articles to disk as one JSON array.
///
/// The array is pretty-printed and UTF-8, and replaces whatever file was at
/// `path` before.
///
/// # Arguments
///
/// * `articles` - Every article the run kept, in window order
/// * `path` - Destination file
///
/// # Returns
///
/// `Ok(())` on success, or an error if serialization or the write fails.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn write_articles(articles: &[Article], path: &Path) -> Result<(), Box<dyn Error>> {
    let json = serde_json::to_string_pretty(articles)?;
    fs::write(path, json).await?;
    info!(count = articles.len(), "Saved articles");
    Ok(())
}
