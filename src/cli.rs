//! Command-line interface definitions for mention_sweep.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Everything except the API key has a built-in default; the key can come
//! from a flag or from the `NEWS_API_KEY` environment variable.

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for the mention_sweep collector.
///
/// Flags override the optional YAML config file, which in turn overrides the
/// built-in defaults (see `config`). Unset options are `None` here so the
/// config layer can tell "operator said nothing" apart from an explicit value.
///
/// # Examples
///
/// ```sh
/// # Collect the default 28 days using the built-in term and source lists
/// mention_sweep --api-key YOUR_KEY
///
/// # Three days, custom output path, key from the environment
/// NEWS_API_KEY=YOUR_KEY mention_sweep -d 3 -o recent.json
///
/// # Track a different figure
/// mention_sweep --api-key YOUR_KEY --term "Taylor Swift" --term "Swift"
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// NewsAPI key sent as the `apiKey` parameter on every request
    #[arg(long, env = "NEWS_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Optional path to a YAML config file with term/source overrides
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// How many daily windows to collect, counting back from today
    #[arg(short, long)]
    pub days: Option<u32>,

    /// A relevance phrase; repeat the flag once per phrase
    #[arg(long = "term", value_name = "PHRASE")]
    pub terms: Vec<String>,

    /// A NewsAPI source identifier; repeat the flag once per outlet
    #[arg(long = "source", value_name = "ID")]
    pub sources: Vec<String>,

    /// Two-letter language code passed to the API
    #[arg(short, long)]
    pub language: Option<String>,

    /// Articles requested per page (the API caps this at 100)
    #[arg(long)]
    pub page_size: Option<u32>,

    /// Path of the JSON file the collected articles are written to
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
